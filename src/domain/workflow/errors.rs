//! Workflow-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ModuleId, SessionId, ValidationError};

/// Errors raised by the session store, flow controller, and report aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// No workflow state exists for the session.
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// The module is not the one currently in focus.
    #[error(
        "Module '{module}' is not in focus for session {session_id} (expected {})",
        .expected.as_ref().map(|m| m.as_str()).unwrap_or("none, workflow complete")
    )]
    InvalidModule {
        session_id: SessionId,
        module: ModuleId,
        expected: Option<ModuleId>,
    },

    /// The same module was selected more than once.
    #[error("Module '{0}' was selected more than once")]
    DuplicateModule(ModuleId),

    /// The module has no definition in the registry.
    #[error("Module '{module}' is not defined in the module registry")]
    UnknownModule {
        session_id: Option<SessionId>,
        module: ModuleId,
    },

    /// Aggregation was attempted before every module was visited.
    #[error("Workflow {session_id} is incomplete: {visited} of {total} modules visited")]
    IncompleteWorkflow {
        session_id: SessionId,
        visited: usize,
        total: usize,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl WorkflowError {
    pub fn unknown_module(session_id: Option<SessionId>, module: ModuleId) -> Self {
        WorkflowError::UnknownModule { session_id, module }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        WorkflowError::Storage(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            WorkflowError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            WorkflowError::InvalidModule { .. } => ErrorCode::InvalidModule,
            WorkflowError::DuplicateModule(_) => ErrorCode::InvalidModule,
            WorkflowError::UnknownModule { .. } => ErrorCode::UnknownModule,
            WorkflowError::IncompleteWorkflow { .. } => ErrorCode::IncompleteWorkflow,
            WorkflowError::Validation(ValidationError::InvalidFormat { field, .. })
                if field == "state_transition" =>
            {
                ErrorCode::InvalidStateTransition
            }
            WorkflowError::Validation(_) => ErrorCode::ValidationFailed,
            WorkflowError::Storage(_) => ErrorCode::StorageError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_module_names_expected_module() {
        let err = WorkflowError::InvalidModule {
            session_id: SessionId::new(),
            module: ModuleId::WebHybrid,
            expected: Some(ModuleId::Fsm),
        };
        let msg = err.to_string();
        assert!(msg.contains("web_hybrid"));
        assert!(msg.contains("expected fsm"));
        assert_eq!(err.code(), ErrorCode::InvalidModule);
    }

    #[test]
    fn invalid_module_after_completion_says_so() {
        let err = WorkflowError::InvalidModule {
            session_id: SessionId::new(),
            module: ModuleId::Fsm,
            expected: None,
        };
        assert!(err.to_string().contains("workflow complete"));
    }

    #[test]
    fn incomplete_workflow_reports_progress() {
        let err = WorkflowError::IncompleteWorkflow {
            session_id: SessionId::new(),
            visited: 1,
            total: 3,
        };
        assert!(err.to_string().contains("1 of 3"));
        assert_eq!(err.code(), ErrorCode::IncompleteWorkflow);
    }

    #[test]
    fn transition_validation_maps_to_state_transition_code() {
        let err: WorkflowError =
            ValidationError::invalid_format("state_transition", "Cannot transition").into();
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);

        let err: WorkflowError = ValidationError::empty_field("subject_name").into();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }
}
