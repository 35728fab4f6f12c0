//! FetchArtifactHandler - reads a published artifact for download.

use std::sync::Arc;

use crate::domain::report::ArtifactName;
use crate::ports::{ArtifactStorage, StorageError};

#[derive(Debug, Clone)]
pub struct FetchArtifactQuery {
    pub name: ArtifactName,
}

#[derive(Debug, Clone)]
pub struct ArtifactContent {
    pub name: ArtifactName,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct FetchArtifactHandler {
    storage: Arc<dyn ArtifactStorage>,
}

impl FetchArtifactHandler {
    pub fn new(storage: Arc<dyn ArtifactStorage>) -> Self {
        Self { storage }
    }

    pub async fn handle(&self, query: FetchArtifactQuery) -> Result<ArtifactContent, StorageError> {
        let bytes = self.storage.read(&query.name).await?;
        Ok(ArtifactContent {
            name: query.name,
            content_type: query.name.format.content_type(),
            bytes,
        })
    }
}
