//! StartWorkflowHandler - creates a session for a selection of modules.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{ModuleId, SessionId};
use crate::domain::registry::ModuleRegistry;
use crate::domain::workflow::{WorkflowError, WorkflowStep};
use crate::ports::SessionStore;

/// Command to start a workflow.
#[derive(Debug, Clone)]
pub struct StartWorkflowCommand {
    pub subject_name: String,
    pub assessment_date: NaiveDate,
    pub selected_modules: Vec<ModuleId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartWorkflowResult {
    pub session_id: SessionId,
    pub step: WorkflowStep,
}

/// Handler for starting workflows.
pub struct StartWorkflowHandler {
    store: Arc<dyn SessionStore>,
    registry: Arc<ModuleRegistry>,
}

impl StartWorkflowHandler {
    pub fn new(store: Arc<dyn SessionStore>, registry: Arc<ModuleRegistry>) -> Self {
        Self { store, registry }
    }

    /// Every selected module must resolve before any state is created.
    pub async fn handle(
        &self,
        cmd: StartWorkflowCommand,
    ) -> Result<StartWorkflowResult, WorkflowError> {
        for &module in &cmd.selected_modules {
            self.registry.resolve(module, None)?;
        }

        let total = cmd.selected_modules.len();
        let session_id = self
            .store
            .create(cmd.subject_name, cmd.assessment_date, cmd.selected_modules)
            .await?;
        let step = WorkflowStep::at(0, total);

        tracing::info!(session_id = %session_id, modules = total, ?step, "Workflow started");

        Ok(StartWorkflowResult { session_id, step })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::application::handlers::workflow::test_support::{date, registry};

    fn handler() -> (StartWorkflowHandler, Arc<InMemorySessionStore>) {
        let store = Arc::new(InMemorySessionStore::new());
        (StartWorkflowHandler::new(store.clone(), registry()), store)
    }

    fn cmd(modules: Vec<ModuleId>) -> StartWorkflowCommand {
        StartWorkflowCommand {
            subject_name: "Acme Corp".to_string(),
            assessment_date: date(),
            selected_modules: modules,
        }
    }

    #[tokio::test]
    async fn starts_at_first_module() {
        let (handler, store) = handler();

        let result = handler
            .handle(cmd(vec![ModuleId::Fsm, ModuleId::WebHybrid]))
            .await
            .unwrap();

        assert_eq!(result.step, WorkflowStep::InModule(0));
        let state = store.get(result.session_id).await.unwrap();
        assert_eq!(state.selected_modules(), &[ModuleId::Fsm, ModuleId::WebHybrid]);
    }

    #[tokio::test]
    async fn empty_selection_is_complete_immediately() {
        let (handler, _) = handler();
        let result = handler.handle(cmd(vec![])).await.unwrap();
        assert_eq!(result.step, WorkflowStep::Complete);
    }

    #[tokio::test]
    async fn unregistered_module_is_rejected_without_creating_state() {
        let (handler, store) = handler();

        let err = handler
            .handle(cmd(vec![ModuleId::Fsm, ModuleId::DlpEsg]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::UnknownModule {
                module: ModuleId::DlpEsg,
                ..
            }
        ));
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn duplicate_selection_is_rejected() {
        let (handler, _) = handler();
        let err = handler
            .handle(cmd(vec![ModuleId::Fsm, ModuleId::Fsm]))
            .await
            .unwrap_err();
        assert_eq!(err, WorkflowError::DuplicateModule(ModuleId::Fsm));
    }

    #[tokio::test]
    async fn blank_subject_is_rejected() {
        let (handler, _) = handler();
        let mut command = cmd(vec![ModuleId::Fsm]);
        command.subject_name = "   ".to_string();

        let err = handler.handle(command).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }
}
