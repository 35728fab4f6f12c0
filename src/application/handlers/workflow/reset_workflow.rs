//! ResetWorkflowHandler - discards a session's state.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::workflow::WorkflowError;
use crate::ports::SessionStore;

#[derive(Debug, Clone)]
pub struct ResetWorkflowCommand {
    pub session_id: SessionId,
}

/// Published artifacts are left in place.
pub struct ResetWorkflowHandler {
    store: Arc<dyn SessionStore>,
}

impl ResetWorkflowHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: ResetWorkflowCommand) -> Result<(), WorkflowError> {
        self.store.reset(cmd.session_id).await?;
        tracing::info!(session_id = %cmd.session_id, "Workflow reset");
        Ok(())
    }
}
