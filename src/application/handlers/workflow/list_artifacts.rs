//! ListArtifactsHandler - published artifacts for a session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::ports::{ArtifactMetadata, ArtifactStorage, StorageError};

#[derive(Debug, Clone)]
pub struct ListArtifactsQuery {
    pub session_id: SessionId,
}

/// Artifacts outlive the session state, so an unknown session lists empty.
pub struct ListArtifactsHandler {
    storage: Arc<dyn ArtifactStorage>,
}

impl ListArtifactsHandler {
    pub fn new(storage: Arc<dyn ArtifactStorage>) -> Self {
        Self { storage }
    }

    pub async fn handle(
        &self,
        query: ListArtifactsQuery,
    ) -> Result<Vec<ArtifactMetadata>, StorageError> {
        self.storage.list_for_session(query.session_id).await
    }
}
