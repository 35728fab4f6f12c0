//! PurgeIdleSessionsHandler - expires sessions that have gone quiet.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::workflow::WorkflowError;
use crate::ports::SessionStore;

pub struct PurgeIdleSessionsHandler {
    store: Arc<dyn SessionStore>,
    ttl_minutes: i64,
}

impl PurgeIdleSessionsHandler {
    pub fn new(store: Arc<dyn SessionStore>, ttl_minutes: i64) -> Self {
        Self { store, ttl_minutes }
    }

    /// Drops every session untouched for longer than the TTL.
    pub async fn handle(&self) -> Result<usize, WorkflowError> {
        // A cutoff before the representable range means nothing is idle yet.
        let Some(cutoff) = Timestamp::now().checked_minus_minutes(self.ttl_minutes) else {
            return Ok(0);
        };
        let purged = self.store.purge_idle(cutoff).await?;
        if purged > 0 {
            tracing::info!(purged, ttl_minutes = self.ttl_minutes, "Purged idle sessions");
        }
        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::workflow::test_support::store_with;

    #[tokio::test]
    async fn fresh_sessions_survive() {
        let (store, id) = store_with(vec![]).await;
        let handler = PurgeIdleSessionsHandler::new(store.clone(), 120);

        assert_eq!(handler.handle().await.unwrap(), 0);
        assert!(store.get(id).await.is_ok());
    }

    #[tokio::test]
    async fn out_of_range_ttl_purges_nothing() {
        let (store, id) = store_with(vec![]).await;
        let handler = PurgeIdleSessionsHandler::new(store.clone(), i64::MAX);

        assert_eq!(handler.handle().await.unwrap(), 0);
        assert!(store.get(id).await.is_ok());
    }

    #[tokio::test]
    async fn negative_ttl_purges_everything() {
        let (store, _) = store_with(vec![]).await;
        let handler = PurgeIdleSessionsHandler::new(store.clone(), -1);

        assert_eq!(handler.handle().await.unwrap(), 1);
        assert_eq!(store.session_count().await, 0);
    }
}
