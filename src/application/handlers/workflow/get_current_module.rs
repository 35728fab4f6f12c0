//! GetCurrentModuleHandler - what the session should work on next.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::registry::{ModuleDefinition, ModuleRegistry};
use crate::domain::workflow::WorkflowError;
use crate::ports::SessionStore;

#[derive(Debug, Clone)]
pub struct GetCurrentModuleQuery {
    pub session_id: SessionId,
}

/// The step the session is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentModuleView {
    InModule {
        index: usize,
        total: usize,
        definition: ModuleDefinition,
        /// Answers already recorded for this module, if any.
        answers: Option<Vec<String>>,
    },
    Complete,
}

/// Read-only; fetching the current module never changes state.
pub struct GetCurrentModuleHandler {
    store: Arc<dyn SessionStore>,
    registry: Arc<ModuleRegistry>,
}

impl GetCurrentModuleHandler {
    pub fn new(store: Arc<dyn SessionStore>, registry: Arc<ModuleRegistry>) -> Self {
        Self { store, registry }
    }

    pub async fn handle(
        &self,
        query: GetCurrentModuleQuery,
    ) -> Result<CurrentModuleView, WorkflowError> {
        let state = self.store.get(query.session_id).await?;

        let Some(module) = state.current_module() else {
            return Ok(CurrentModuleView::Complete);
        };

        let definition = self
            .registry
            .resolve(module, Some(query.session_id))
            .map_err(|e| {
                tracing::error!(session_id = %query.session_id, module = %module, "Selected module missing from registry");
                e
            })?;

        Ok(CurrentModuleView::InModule {
            index: state.cursor(),
            total: state.selected_modules().len(),
            definition: definition.clone(),
            answers: state.answers_for(module).map(<[String]>::to_vec),
        })
    }
}
