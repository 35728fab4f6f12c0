//! GetWorkflowHandler - progress view of a session.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{ModuleId, SessionId, Timestamp};
use crate::domain::workflow::{WorkflowError, WorkflowStep};
use crate::ports::SessionStore;

#[derive(Debug, Clone)]
pub struct GetWorkflowQuery {
    pub session_id: SessionId,
}

/// Snapshot of a workflow's progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowProgress {
    pub session_id: SessionId,
    pub subject_name: String,
    pub assessment_date: NaiveDate,
    pub selected_modules: Vec<ModuleId>,
    pub step: WorkflowStep,
    pub visited: usize,
    pub total: usize,
    pub current_module: Option<ModuleId>,
    pub updated_at: Timestamp,
}

pub struct GetWorkflowHandler {
    store: Arc<dyn SessionStore>,
}

impl GetWorkflowHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetWorkflowQuery) -> Result<WorkflowProgress, WorkflowError> {
        let state = self.store.get(query.session_id).await?;

        Ok(WorkflowProgress {
            session_id: state.id(),
            subject_name: state.subject_name().to_string(),
            assessment_date: state.assessment_date(),
            selected_modules: state.selected_modules().to_vec(),
            step: state.step(),
            visited: state.cursor(),
            total: state.selected_modules().len(),
            current_module: state.current_module(),
            updated_at: *state.updated_at(),
        })
    }
}
