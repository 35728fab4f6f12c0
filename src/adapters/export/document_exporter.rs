//! Template-driven report document exporter.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::DocumentFormat;
use crate::domain::foundation::SessionId;
use crate::domain::registry::ModuleRegistry;
use crate::domain::report::{ArtifactFormat, ArtifactKind, ModuleReport, ReportDocument};
use crate::ports::{ArtifactMetadata, ArtifactStorage, ExportError, ReportExporter};

use super::document_renderer::DocumentRenderer;
use super::template::{escape_markdown, FieldValue, Fields, ReportTemplate};

const NO_FINDINGS: &str = "No answers provided.";

/// Maps a [`ReportDocument`] onto the template's input schema, renders it,
/// and publishes the paginated result.
///
/// Document fields: `title`, `subject_name`, `assessment_date`, `module_count`.
/// Section fields: `module_id`, `module_title`, `answer_count`, `findings`.
/// Sections can also reference any document field.
pub struct TemplateDocumentExporter {
    template: Arc<ReportTemplate>,
    registry: Arc<ModuleRegistry>,
    renderer: DocumentRenderer,
    format: ArtifactFormat,
    storage: Arc<dyn ArtifactStorage>,
}

impl TemplateDocumentExporter {
    pub fn new(
        template: Arc<ReportTemplate>,
        registry: Arc<ModuleRegistry>,
        storage: Arc<dyn ArtifactStorage>,
    ) -> Self {
        Self {
            template,
            registry,
            renderer: DocumentRenderer::new(),
            format: ArtifactFormat::Html,
            storage,
        }
    }

    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = match format {
            DocumentFormat::Html => ArtifactFormat::Html,
            DocumentFormat::Pdf => ArtifactFormat::Pdf,
        };
        self
    }

    pub fn with_renderer(mut self, renderer: DocumentRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    fn document_fields(&self, report: &ReportDocument) -> Fields {
        let mut fields = Fields::new();
        fields.insert("title".into(), FieldValue::text(self.template.title.as_str()));
        fields.insert(
            "assessment_date".into(),
            FieldValue::text(report.assessment_date_iso()),
        );
        fields.insert(
            "module_count".into(),
            FieldValue::text(report.module_reports.len().to_string()),
        );
        if !report.subject_name.trim().is_empty() {
            fields.insert(
                "subject_name".into(),
                FieldValue::text(report.subject_name.as_str()),
            );
        }
        self.template.apply_placeholders(&mut fields);
        fields
    }

    fn section_fields(&self, module: &ModuleReport) -> Fields {
        let title = self
            .registry
            .get(module.module_id)
            .map(|def| def.title.clone())
            .unwrap_or_else(|| module.module_id.display_name().to_string());

        // One list item per answer; the list markers are the only markdown.
        let findings = if module.has_findings() {
            FieldValue::markdown(
                module
                    .answers
                    .iter()
                    .map(|a| format!("- {}", escape_markdown(a)))
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        } else {
            FieldValue::text(NO_FINDINGS)
        };

        let mut fields = Fields::new();
        fields.insert("module_id".into(), FieldValue::text(module.module_id.as_str()));
        fields.insert("module_title".into(), FieldValue::text(title));
        fields.insert(
            "answer_count".into(),
            FieldValue::text(module.answers.len().to_string()),
        );
        fields.insert("findings".into(), findings);
        fields
    }

    /// Render the report without publishing.
    pub async fn render(&self, report: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        let document = self.document_fields(report);
        let sections: Vec<Fields> = report
            .module_reports
            .iter()
            .map(|m| self.section_fields(m))
            .collect();

        let pages = self.template.render(&document, &sections)?;

        match self.format {
            ArtifactFormat::Pdf => self.renderer.to_pdf(&self.template.title, &pages).await,
            _ => Ok(self
                .renderer
                .to_html(&self.template.title, &pages)
                .into_bytes()),
        }
    }
}

#[async_trait]
impl ReportExporter for TemplateDocumentExporter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Document
    }

    fn format(&self) -> ArtifactFormat {
        self.format
    }

    async fn export(
        &self,
        session_id: SessionId,
        report: &ReportDocument,
    ) -> Result<ArtifactMetadata, ExportError> {
        let content = self.render(report).await?;
        let name = self.artifact_name(session_id);
        let metadata = self.storage.publish(&name, &content).await?;

        tracing::info!(
            session_id = %session_id,
            artifact = %name,
            sections = report.module_reports.len(),
            "Document exported"
        );
        Ok(metadata)
    }
}
