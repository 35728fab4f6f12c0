//! Artifact Storage Port - durable storage for published export artifacts.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::report::ArtifactName;

/// Port for publishing and reading export artifacts.
///
/// # Contract
///
/// Implementations must:
/// - Publish atomically: a reader sees either the previous artifact or the
///   complete new one, never partial content
/// - Leave the previous artifact in place when a publish fails
/// - Compute SHA-256 checksums for integrity verification
#[async_trait]
pub trait ArtifactStorage: Send + Sync {
    /// Publish artifact content under its name, replacing any previous version.
    async fn publish(
        &self,
        name: &ArtifactName,
        content: &[u8],
    ) -> Result<ArtifactMetadata, StorageError>;

    /// Read a published artifact.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if nothing has been published under the name.
    async fn read(&self, name: &ArtifactName) -> Result<Vec<u8>, StorageError>;

    async fn exists(&self, name: &ArtifactName) -> Result<bool, StorageError>;

    /// Size, modification time, and checksum of a published artifact.
    async fn metadata(&self, name: &ArtifactName) -> Result<ArtifactMetadata, StorageError>;

    /// All artifacts published for a session.
    async fn list_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<ArtifactMetadata>, StorageError>;
}

/// Metadata about a published artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMetadata {
    pub name: ArtifactName,

    /// File size in bytes.
    pub size_bytes: u64,

    /// Last modification timestamp.
    pub modified_at: Timestamp,

    /// Hex-encoded SHA-256 checksum of the content.
    pub checksum: String,
}

/// Errors that can occur during artifact storage operations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Artifact was not found.
    #[error("Artifact not found: {name}")]
    NotFound { name: String },

    /// Permission denied accessing the file.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    /// IO error during file operation.
    #[error("IO error: {message}")]
    Io { message: String },

    /// Artifact is too large.
    #[error("Artifact too large: {size_bytes} bytes (max: {max_bytes})")]
    TooLarge { size_bytes: u64, max_bytes: u64 },
}

impl StorageError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn permission_denied(path: impl Into<String>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn too_large(size_bytes: u64, max_bytes: u64) -> Self {
        Self::TooLarge {
            size_bytes,
            max_bytes,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_not_found_names_artifact() {
        let err = StorageError::not_found("abc-assessment.csv");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("abc-assessment.csv"));
    }

    #[test]
    fn storage_error_too_large_reports_limit() {
        let err = StorageError::too_large(20, 10);
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("max: 10"));
    }
}
