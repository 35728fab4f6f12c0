//! Artifact storage adapters.

mod local_artifact_storage;

pub use local_artifact_storage::LocalArtifactStorage;
