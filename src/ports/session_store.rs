//! Session Store Port - per-session workflow state.
//!
//! Sessions are fully isolated: an adapter must never let one session's
//! operations observe or modify another session's state.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{ModuleId, SessionId, Timestamp};
use crate::domain::workflow::{Submission, WorkflowError, WorkflowState, WorkflowStep};

/// Port for creating, reading, and mutating workflow state keyed by session.
///
/// # Contract
///
/// Implementations must:
/// - Apply each mutating call atomically with respect to the session's state
/// - Leave state untouched when a call fails
/// - Treat a retried identical request as a no-op
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a new workflow and return its session id.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank subject name, `DuplicateModule` for a repeated selection.
    async fn create(
        &self,
        subject_name: String,
        assessment_date: NaiveDate,
        selected_modules: Vec<ModuleId>,
    ) -> Result<SessionId, WorkflowError>;

    /// Load a snapshot of the workflow state.
    ///
    /// # Errors
    ///
    /// `SessionNotFound` if no state exists for the id.
    async fn get(&self, session_id: SessionId) -> Result<WorkflowState, WorkflowError>;

    /// Record answers for the module in focus, overwriting an earlier submission.
    ///
    /// # Errors
    ///
    /// `InvalidModule` if `module` is not the module at the cursor.
    async fn record_answers(
        &self,
        session_id: SessionId,
        module: ModuleId,
        answers: Vec<String>,
    ) -> Result<(), WorkflowError>;

    /// Advance the cursor past `from_cursor` and return the resulting step.
    ///
    /// A repeated advance from the same position is a no-op.
    async fn advance_cursor(
        &self,
        session_id: SessionId,
        from_cursor: usize,
    ) -> Result<WorkflowStep, WorkflowError>;

    /// Record answers for the module in focus and advance past it in one
    /// atomic step. An identical retry for the module just left is reported
    /// as `replayed` without changing state.
    ///
    /// # Errors
    ///
    /// `InvalidModule` for any other module.
    async fn submit_answers(
        &self,
        session_id: SessionId,
        module: ModuleId,
        answers: Vec<String>,
    ) -> Result<Submission, WorkflowError>;

    /// Discard a session's state. Resetting an unknown session succeeds.
    async fn reset(&self, session_id: SessionId) -> Result<(), WorkflowError>;

    /// Drop sessions idle since before `cutoff`, returning how many were dropped.
    async fn purge_idle(&self, cutoff: Timestamp) -> Result<usize, WorkflowError>;
}
