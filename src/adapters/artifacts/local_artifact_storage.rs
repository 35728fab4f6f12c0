//! Local Filesystem Artifact Storage - Implementation of ArtifactStorage.
//!
//! Publishes export artifacts into a single reports directory. Each publish
//! writes a uniquely named temp file, syncs it, then renames it over the
//! final name, so readers never observe a partially written artifact.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::report::ArtifactName;
use crate::ports::{ArtifactMetadata, ArtifactStorage, StorageError};

/// Maximum artifact size allowed (25 MB).
const MAX_ARTIFACT_BYTES: u64 = 25 * 1024 * 1024;

const TEMP_SUFFIX: &str = ".tmp";

/// Local filesystem storage for export artifacts.
///
/// # Directory Structure
///
/// ```text
/// {reports_dir}/
/// ├── 5f0c...-assessment.csv
/// ├── 5f0c...-assessment.html
/// └── 9a41...-assessment.csv
/// ```
#[derive(Debug, Clone)]
pub struct LocalArtifactStorage {
    reports_dir: PathBuf,
}

impl LocalArtifactStorage {
    pub fn new(reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
        }
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    fn artifact_path(&self, name: &ArtifactName) -> PathBuf {
        self.reports_dir.join(name.to_string())
    }

    /// Unique per publish so concurrent exports of one artifact never share a temp file.
    fn temp_path(&self, name: &ArtifactName) -> PathBuf {
        self.reports_dir
            .join(format!(".{}.{}{}", name, Uuid::new_v4().simple(), TEMP_SUFFIX))
    }

    async fn ensure_reports_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.reports_dir).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to create reports directory {}: {}",
                self.reports_dir.display(),
                e
            ))
        })
    }

    fn compute_checksum(content: &[u8]) -> String {
        hex::encode(Sha256::digest(content))
    }

    fn system_time_to_timestamp(system_time: SystemTime) -> Timestamp {
        let datetime: DateTime<Utc> = system_time.into();
        Timestamp::from_datetime(datetime)
    }

    fn map_io(path: &Path, action: &str, e: std::io::Error) -> StorageError {
        match e.kind() {
            ErrorKind::NotFound => StorageError::not_found(
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
            ),
            ErrorKind::PermissionDenied => StorageError::permission_denied(path.display().to_string()),
            _ => StorageError::io(format!("Failed to {} {}: {}", action, path.display(), e)),
        }
    }

    async fn write_temp(path: &Path, content: &[u8]) -> Result<(), StorageError> {
        let mut file = fs::File::create(path)
            .await
            .map_err(|e| Self::map_io(path, "create", e))?;
        file.write_all(content)
            .await
            .map_err(|e| Self::map_io(path, "write", e))?;
        file.sync_all()
            .await
            .map_err(|e| Self::map_io(path, "sync", e))
    }
}

#[async_trait]
impl ArtifactStorage for LocalArtifactStorage {
    async fn publish(
        &self,
        name: &ArtifactName,
        content: &[u8],
    ) -> Result<ArtifactMetadata, StorageError> {
        let size = content.len() as u64;
        if size > MAX_ARTIFACT_BYTES {
            return Err(StorageError::too_large(size, MAX_ARTIFACT_BYTES));
        }

        self.ensure_reports_dir().await?;

        let temp_path = self.temp_path(name);
        let final_path = self.artifact_path(name);

        if let Err(e) = Self::write_temp(&temp_path, content).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            )));
        }

        tracing::debug!(artifact = %name, size_bytes = size, "Published artifact");

        Ok(ArtifactMetadata {
            name: *name,
            size_bytes: size,
            modified_at: Timestamp::now(),
            checksum: Self::compute_checksum(content),
        })
    }

    async fn read(&self, name: &ArtifactName) -> Result<Vec<u8>, StorageError> {
        let path = self.artifact_path(name);
        fs::read(&path)
            .await
            .map_err(|e| Self::map_io(&path, "read", e))
    }

    async fn exists(&self, name: &ArtifactName) -> Result<bool, StorageError> {
        fs::try_exists(self.artifact_path(name))
            .await
            .map_err(|e| StorageError::io(e.to_string()))
    }

    async fn metadata(&self, name: &ArtifactName) -> Result<ArtifactMetadata, StorageError> {
        let path = self.artifact_path(name);

        let file_meta = fs::metadata(&path)
            .await
            .map_err(|e| Self::map_io(&path, "stat", e))?;
        let modified = file_meta
            .modified()
            .map_err(|e| StorageError::io(format!("Failed to get modification time: {}", e)))?;

        let content = self.read(name).await?;

        Ok(ArtifactMetadata {
            name: *name,
            size_bytes: file_meta.len(),
            modified_at: Self::system_time_to_timestamp(modified),
            checksum: Self::compute_checksum(&content),
        })
    }

    async fn list_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<ArtifactMetadata>, StorageError> {
        let mut entries = match fs::read_dir(&self.reports_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::map_io(&self.reports_dir, "list", e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::io(format!("Failed to read directory entry: {}", e)))?
        {
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Ok(name) = file_name.parse::<ArtifactName>() {
                if name.session_id == session_id {
                    names.push(name);
                }
            }
        }

        names.sort_by_key(|n| n.format.extension());

        let mut artifacts = Vec::with_capacity(names.len());
        for name in names {
            match self.metadata(&name).await {
                Ok(meta) => artifacts.push(meta),
                // Replaced or removed between listing and stat.
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::ArtifactFormat;
    use tempfile::TempDir;

    fn setup() -> (LocalArtifactStorage, TempDir) {
        let dir = TempDir::new().unwrap();
        (LocalArtifactStorage::new(dir.path()), dir)
    }

    #[tokio::test]
    async fn publish_and_read_round_trip() {
        let (storage, _dir) = setup();
        let name = ArtifactName::new(SessionId::new(), ArtifactFormat::Csv);

        let meta = storage.publish(&name, b"a,b\n1,2\n").await.unwrap();

        assert_eq!(meta.size_bytes, 8);
        assert_eq!(meta.checksum.len(), 64);
        assert_eq!(storage.read(&name).await.unwrap(), b"a,b\n1,2\n");
    }

    #[tokio::test]
    async fn publish_creates_reports_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested").join("reports");
        let storage = LocalArtifactStorage::new(&nested);
        let name = ArtifactName::new(SessionId::new(), ArtifactFormat::Html);

        storage.publish(&name, b"<p>hi</p>").await.unwrap();

        assert!(nested.join(name.to_string()).exists());
    }

    #[tokio::test]
    async fn publish_replaces_previous_content() {
        let (storage, _dir) = setup();
        let name = ArtifactName::new(SessionId::new(), ArtifactFormat::Csv);

        let first = storage.publish(&name, b"first").await.unwrap();
        let second = storage.publish(&name, b"second").await.unwrap();

        assert_ne!(first.checksum, second.checksum);
        assert_eq!(storage.read(&name).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn publish_leaves_no_temp_files() {
        let (storage, dir) = setup();
        let name = ArtifactName::new(SessionId::new(), ArtifactFormat::Csv);
        storage.publish(&name, b"x").await.unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(TEMP_SUFFIX))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn oversized_publish_is_rejected_and_keeps_previous() {
        let (storage, _dir) = setup();
        let name = ArtifactName::new(SessionId::new(), ArtifactFormat::Pdf);
        storage.publish(&name, b"v1").await.unwrap();

        let big = vec![0u8; (MAX_ARTIFACT_BYTES + 1) as usize];
        let err = storage.publish(&name, &big).await.unwrap_err();

        assert!(matches!(err, StorageError::TooLarge { .. }));
        assert_eq!(storage.read(&name).await.unwrap(), b"v1");
    }

    #[tokio::test]
    async fn read_missing_is_not_found() {
        let (storage, _dir) = setup();
        let name = ArtifactName::new(SessionId::new(), ArtifactFormat::Csv);

        let err = storage.read(&name).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!storage.exists(&name).await.unwrap());
    }

    #[tokio::test]
    async fn metadata_checksum_matches_publish() {
        let (storage, _dir) = setup();
        let name = ArtifactName::new(SessionId::new(), ArtifactFormat::Html);

        let published = storage.publish(&name, b"<h1>Report</h1>").await.unwrap();
        let meta = storage.metadata(&name).await.unwrap();

        assert_eq!(meta.checksum, published.checksum);
        assert_eq!(meta.size_bytes, published.size_bytes);
    }

    #[tokio::test]
    async fn list_for_session_filters_by_session() {
        let (storage, dir) = setup();
        let mine = SessionId::new();
        let other = SessionId::new();

        storage
            .publish(&ArtifactName::new(mine, ArtifactFormat::Html), b"doc")
            .await
            .unwrap();
        storage
            .publish(&ArtifactName::new(mine, ArtifactFormat::Csv), b"sheet")
            .await
            .unwrap();
        storage
            .publish(&ArtifactName::new(other, ArtifactFormat::Csv), b"other")
            .await
            .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let listed = storage.list_for_session(mine).await.unwrap();
        let formats: Vec<_> = listed.iter().map(|m| m.name.format).collect();
        assert_eq!(formats, vec![ArtifactFormat::Csv, ArtifactFormat::Html]);
    }

    #[tokio::test]
    async fn list_for_session_without_reports_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = LocalArtifactStorage::new(dir.path().join("missing"));

        assert!(storage.list_for_session(SessionId::new()).await.unwrap().is_empty());
    }
}
