//! Ports - interfaces the application layer depends on.
//!
//! Adapters provide the implementations; the domain and application layers
//! only ever see these traits.

mod artifact_storage;
mod report_exporter;
mod session_store;

pub use artifact_storage::{ArtifactMetadata, ArtifactStorage, StorageError};
pub use report_exporter::{ExportError, ReportExporter};
pub use session_store::SessionStore;
