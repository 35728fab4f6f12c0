//! Report module - canonical report document, its aggregation, and artifact naming.

mod aggregator;
mod artifact;
mod document;
mod errors;

pub use aggregator::ReportAggregator;
pub use artifact::{ArtifactFormat, ArtifactKind, ArtifactName};
pub use document::{ModuleReport, ReportDocument};
pub use errors::ExportFailure;
