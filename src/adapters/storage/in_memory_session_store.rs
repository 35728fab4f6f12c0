//! In-Memory Session Store Adapter
//!
//! Keeps workflow state in a process-local map. Each operation takes the
//! write lock once, so every mutation is atomic for its session.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ModuleId, SessionId, Timestamp};
use crate::domain::workflow::{Submission, WorkflowError, WorkflowState, WorkflowStep};
use crate::ports::SessionStore;

/// In-memory storage for workflow state
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, WorkflowState>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(
        &self,
        subject_name: String,
        assessment_date: NaiveDate,
        selected_modules: Vec<ModuleId>,
    ) -> Result<SessionId, WorkflowError> {
        let session_id = SessionId::new();
        let state = WorkflowState::new(session_id, subject_name, assessment_date, selected_modules)?;

        self.sessions.write().await.insert(session_id, state);
        Ok(session_id)
    }

    async fn get(&self, session_id: SessionId) -> Result<WorkflowState, WorkflowError> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .cloned()
            .ok_or(WorkflowError::SessionNotFound(session_id))
    }

    async fn record_answers(
        &self,
        session_id: SessionId,
        module: ModuleId,
        answers: Vec<String>,
    ) -> Result<(), WorkflowError> {
        let mut sessions = self.sessions.write().await;
        let state = sessions
            .get_mut(&session_id)
            .ok_or(WorkflowError::SessionNotFound(session_id))?;
        state.record_answers(module, answers)
    }

    async fn advance_cursor(
        &self,
        session_id: SessionId,
        from_cursor: usize,
    ) -> Result<WorkflowStep, WorkflowError> {
        let mut sessions = self.sessions.write().await;
        let state = sessions
            .get_mut(&session_id)
            .ok_or(WorkflowError::SessionNotFound(session_id))?;
        state.advance_from(from_cursor)
    }

    async fn submit_answers(
        &self,
        session_id: SessionId,
        module: ModuleId,
        answers: Vec<String>,
    ) -> Result<Submission, WorkflowError> {
        let mut sessions = self.sessions.write().await;
        let state = sessions
            .get_mut(&session_id)
            .ok_or(WorkflowError::SessionNotFound(session_id))?;

        // Applied to a copy so a failure never leaves a half-submitted module.
        let mut next = state.clone();
        let submission = next.submit(module, answers)?;
        *state = next;
        Ok(submission)
    }

    async fn reset(&self, session_id: SessionId) -> Result<(), WorkflowError> {
        self.sessions.write().await.remove(&session_id);
        Ok(())
    }

    async fn purge_idle(&self, cutoff: Timestamp) -> Result<usize, WorkflowError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, state| !state.is_idle_since(&cutoff));
        Ok(before - sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    async fn store_with(modules: Vec<ModuleId>) -> (InMemorySessionStore, SessionId) {
        let store = InMemorySessionStore::new();
        let id = store
            .create("Acme Corp".to_string(), date(), modules)
            .await
            .unwrap();
        (store, id)
    }

    #[tokio::test]
    async fn create_and_get_round_trip() {
        let (store, id) = store_with(vec![ModuleId::Fsm]).await;

        let state = store.get(id).await.unwrap();
        assert_eq!(state.id(), id);
        assert_eq!(state.subject_name(), "Acme Corp");
        assert_eq!(state.selected_modules(), &[ModuleId::Fsm]);
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn get_unknown_session_is_not_found() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();
        assert_eq!(
            store.get(id).await.unwrap_err(),
            WorkflowError::SessionNotFound(id)
        );
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_without_storing() {
        let store = InMemorySessionStore::new();
        let result = store
            .create(" ".to_string(), date(), vec![ModuleId::Fsm])
            .await;
        assert!(result.is_err());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn record_answers_for_wrong_module_leaves_state_unchanged() {
        let (store, id) = store_with(vec![ModuleId::Fsm, ModuleId::WebHybrid]).await;
        let before = store.get(id).await.unwrap();

        let err = store
            .record_answers(id, ModuleId::WebHybrid, vec!["x".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::InvalidModule { .. }));
        assert_eq!(store.get(id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn record_then_advance() {
        let (store, id) = store_with(vec![ModuleId::Fsm]).await;

        store
            .record_answers(id, ModuleId::Fsm, vec!["no issues".to_string()])
            .await
            .unwrap();
        let step = store.advance_cursor(id, 0).await.unwrap();

        assert_eq!(step, WorkflowStep::Complete);
        let state = store.get(id).await.unwrap();
        assert_eq!(state.answers_for(ModuleId::Fsm).unwrap(), ["no issues".to_string()]);
    }

    #[tokio::test]
    async fn concurrent_identical_submissions_advance_once() {
        let (store, id) = store_with(vec![ModuleId::Fsm, ModuleId::WebHybrid]).await;
        let answers = vec!["ok".to_string()];

        let (a, b) = tokio::join!(
            store.submit_answers(id, ModuleId::Fsm, answers.clone()),
            store.submit_answers(id, ModuleId::Fsm, answers.clone()),
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert!(a.replayed != b.replayed);
        assert_eq!(a.step, WorkflowStep::InModule(1));
        assert_eq!(b.step, WorkflowStep::InModule(1));
        assert_eq!(store.get(id).await.unwrap().cursor(), 1);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = InMemorySessionStore::new();
        let a = store
            .create("A".to_string(), date(), vec![ModuleId::Fsm])
            .await
            .unwrap();
        let b = store
            .create("B".to_string(), date(), vec![ModuleId::Fsm])
            .await
            .unwrap();

        store
            .record_answers(a, ModuleId::Fsm, vec!["only a".to_string()])
            .await
            .unwrap();
        store.advance_cursor(a, 0).await.unwrap();

        let b_state = store.get(b).await.unwrap();
        assert_eq!(b_state.cursor(), 0);
        assert!(b_state.answers_for(ModuleId::Fsm).is_none());
    }

    #[tokio::test]
    async fn reset_discards_state_and_is_idempotent() {
        let (store, id) = store_with(vec![]).await;

        store.reset(id).await.unwrap();
        store.reset(id).await.unwrap();

        assert!(matches!(
            store.get(id).await,
            Err(WorkflowError::SessionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn purge_idle_drops_only_stale_sessions() {
        let (store, _id) = store_with(vec![]).await;

        let removed = store
            .purge_idle(Timestamp::now().minus_minutes(60))
            .await
            .unwrap();
        assert_eq!(removed, 0);

        let removed = store
            .purge_idle(Timestamp::now().plus_minutes(1))
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.session_count().await, 0);
    }
}
