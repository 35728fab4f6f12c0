//! SubmitAnswersHandler - records answers for the module in focus and advances.

use std::sync::Arc;

use crate::domain::foundation::{ModuleId, SessionId};
use crate::domain::workflow::{Submission, WorkflowError};
use crate::ports::SessionStore;

/// Command to submit answers for one module.
#[derive(Debug, Clone)]
pub struct SubmitAnswersCommand {
    pub session_id: SessionId,
    pub module: ModuleId,
    pub answers: Vec<String>,
}

pub type SubmitAnswersResult = Submission;

/// Handler for answer submission.
pub struct SubmitAnswersHandler {
    store: Arc<dyn SessionStore>,
}

impl SubmitAnswersHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: SubmitAnswersCommand,
    ) -> Result<SubmitAnswersResult, WorkflowError> {
        let answer_count = cmd.answers.len();
        let result = self
            .store
            .submit_answers(cmd.session_id, cmd.module, cmd.answers)
            .await;

        match &result {
            Ok(submission) if submission.replayed => {
                tracing::debug!(session_id = %cmd.session_id, module = %cmd.module, "Duplicate submission ignored");
            }
            Ok(submission) => {
                tracing::info!(
                    session_id = %cmd.session_id,
                    module = %cmd.module,
                    answers = answer_count,
                    step = ?submission.step,
                    "Module answered"
                );
            }
            Err(WorkflowError::InvalidModule { expected, .. }) => {
                tracing::warn!(
                    session_id = %cmd.session_id,
                    module = %cmd.module,
                    ?expected,
                    "Submission for module not in focus"
                );
            }
            Err(_) => {}
        }

        result
    }
}
