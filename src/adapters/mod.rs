//! Adapters - Implementations of port interfaces.
//!
//! - `artifacts` - Filesystem artifact publishing
//! - `export` - Spreadsheet and document exporters
//! - `http` - axum REST API
//! - `registry` - Module catalogue loading
//! - `storage` - Session state storage

pub mod artifacts;
pub mod export;
pub mod http;
pub mod registry;
pub mod storage;

pub use artifacts::LocalArtifactStorage;
pub use export::{CsvSpreadsheetExporter, DocumentRenderer, TemplateDocumentExporter};
pub use registry::load_registry;
pub use storage::InMemorySessionStore;
