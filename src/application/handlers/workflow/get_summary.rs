//! GetSummaryHandler - aggregates a completed workflow into its report.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::report::{ReportAggregator, ReportDocument};
use crate::domain::workflow::WorkflowError;
use crate::ports::SessionStore;

#[derive(Debug, Clone)]
pub struct GetSummaryQuery {
    pub session_id: SessionId,
}

pub struct GetSummaryHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSummaryHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// # Errors
    ///
    /// `IncompleteWorkflow` until every selected module has been visited.
    pub async fn handle(&self, query: GetSummaryQuery) -> Result<ReportDocument, WorkflowError> {
        let state = self.store.get(query.session_id).await?;
        ReportAggregator::build(&state)
    }
}
