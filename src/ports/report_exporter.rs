//! Report Exporter Port - renders a ReportDocument into a published artifact.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::report::{ArtifactFormat, ArtifactKind, ArtifactName, ReportDocument};

use super::{ArtifactMetadata, StorageError};

/// Port for one export renderer.
///
/// # Contract
///
/// Implementations must:
/// - Treat the report as read-only
/// - Own exactly one output artifact per session, named by [`ReportExporter::artifact_name`]
/// - Publish nothing when rendering fails
#[async_trait]
pub trait ReportExporter: Send + Sync {
    /// Which exporter this is, for outcome reporting.
    fn kind(&self) -> ArtifactKind;

    /// Output format of the published artifact.
    fn format(&self) -> ArtifactFormat;

    /// Name of the artifact this exporter publishes for a session.
    fn artifact_name(&self, session_id: SessionId) -> ArtifactName {
        ArtifactName::new(session_id, self.format())
    }

    /// Render the report and publish it.
    async fn export(
        &self,
        session_id: SessionId,
        report: &ReportDocument,
    ) -> Result<ArtifactMetadata, ExportError>;
}

/// Errors that can occur while exporting a report.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// The renderer could not produce output.
    #[error("Render failed: {0}")]
    Render(String),

    /// A field required by the template was absent from the render input.
    #[error("Template field '{field}' is required but was not supplied")]
    MissingField { field: String },

    /// An external conversion tool is unavailable.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Conversion exceeded its time budget.
    #[error("Conversion timed out after {0} seconds")]
    Timeout(u64),

    /// The rendered artifact could not be published.
    #[error("Publish failed: {0}")]
    Storage(#[from] StorageError),
}

impl ExportError {
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_names_the_field() {
        let err = ExportError::missing_field("prepared_by");
        assert!(err.to_string().contains("prepared_by"));
    }

    #[test]
    fn storage_errors_convert() {
        let err: ExportError = StorageError::io("disk full").into();
        assert!(matches!(err, ExportError::Storage(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
