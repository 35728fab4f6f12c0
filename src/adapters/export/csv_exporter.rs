//! CSV spreadsheet exporter.
//!
//! One row per selected module, in selection order:
//!
//! | subject_name | assessment_date | module_id | answers |
//! |---|---|---|---|
//! | Acme Corp | 2024-01-15 | fsm | no issues |
//!
//! Answers are joined with `"; "`. A module with no answers is written as
//! `no answers provided`. The header row is always present.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::report::{ArtifactFormat, ArtifactKind, ModuleReport, ReportDocument};
use crate::ports::{ArtifactMetadata, ArtifactStorage, ExportError, ReportExporter};

/// Column headers, in output order.
pub const CSV_HEADERS: [&str; 4] = ["subject_name", "assessment_date", "module_id", "answers"];

/// Delimiter between answers within a single cell.
pub const ANSWER_DELIMITER: &str = "; ";

/// Cell content for a module with no recorded answers.
pub const NO_ANSWERS_SENTINEL: &str = "no answers provided";

/// Renders reports as CSV and publishes them through an [`ArtifactStorage`].
pub struct CsvSpreadsheetExporter {
    storage: Arc<dyn ArtifactStorage>,
}

impl CsvSpreadsheetExporter {
    pub fn new(storage: Arc<dyn ArtifactStorage>) -> Self {
        Self { storage }
    }

    /// Render the report to CSV bytes without publishing.
    pub fn render(report: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(CSV_HEADERS)
            .map_err(|e| ExportError::render(format!("CSV header: {}", e)))?;

        let date = report.assessment_date_iso();
        for module in &report.module_reports {
            writer
                .write_record([
                    report.subject_name.as_str(),
                    date.as_str(),
                    module.module_id.as_str(),
                    answers_cell(module).as_str(),
                ])
                .map_err(|e| {
                    ExportError::render(format!("CSV row for '{}': {}", module.module_id, e))
                })?;
        }

        writer
            .into_inner()
            .map_err(|e| ExportError::render(format!("CSV flush: {}", e.error())))
    }
}

fn answers_cell(module: &ModuleReport) -> String {
    if module.answers.is_empty() {
        NO_ANSWERS_SENTINEL.to_string()
    } else {
        module.answers.join(ANSWER_DELIMITER)
    }
}

#[async_trait]
impl ReportExporter for CsvSpreadsheetExporter {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Spreadsheet
    }

    fn format(&self) -> ArtifactFormat {
        ArtifactFormat::Csv
    }

    async fn export(
        &self,
        session_id: SessionId,
        report: &ReportDocument,
    ) -> Result<ArtifactMetadata, ExportError> {
        let content = Self::render(report)?;
        let name = self.artifact_name(session_id);
        let metadata = self.storage.publish(&name, &content).await?;

        tracing::info!(
            session_id = %session_id,
            artifact = %name,
            rows = report.module_reports.len(),
            "Spreadsheet exported"
        );
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::artifacts::LocalArtifactStorage;
    use crate::domain::foundation::ModuleId;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn report(modules: Vec<(ModuleId, Vec<&str>)>) -> ReportDocument {
        ReportDocument {
            subject_name: "Acme Corp".to_string(),
            assessment_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            module_reports: modules
                .into_iter()
                .map(|(module_id, answers)| ModuleReport {
                    module_id,
                    answers: answers.into_iter().map(String::from).collect(),
                })
                .collect(),
        }
    }

    fn render_str(report: &ReportDocument) -> String {
        String::from_utf8(CsvSpreadsheetExporter::render(report).unwrap()).unwrap()
    }

    #[test]
    fn renders_one_row_per_module_in_order() {
        let csv = render_str(&report(vec![
            (ModuleId::Fsm, vec!["no issues"]),
            (ModuleId::WebHybrid, vec!["hotfix pending", "reboot required"]),
        ]));

        assert_eq!(
            csv,
            "subject_name,assessment_date,module_id,answers\n\
             Acme Corp,2024-01-15,fsm,no issues\n\
             Acme Corp,2024-01-15,web_hybrid,hotfix pending; reboot required\n"
        );
    }

    #[test]
    fn empty_answers_use_sentinel() {
        let csv = render_str(&report(vec![(ModuleId::DlpIcap, vec![])]));
        assert!(csv.ends_with("dlp_icap,no answers provided\n"));
    }

    #[test]
    fn empty_report_is_header_only() {
        let csv = render_str(&report(vec![]));
        assert_eq!(csv, "subject_name,assessment_date,module_id,answers\n");
    }

    #[test]
    fn cells_with_commas_are_quoted() {
        let csv = render_str(&report(vec![(ModuleId::Fsm, vec!["disk 90%, logs full"])]));
        assert!(csv.contains("\"disk 90%, logs full\""));
    }

    #[tokio::test]
    async fn export_publishes_session_artifact() {
        let dir = TempDir::new().unwrap();
        let storage = Arc::new(LocalArtifactStorage::new(dir.path()));
        let exporter = CsvSpreadsheetExporter::new(storage.clone());
        let session_id = SessionId::new();

        let meta = exporter
            .export(session_id, &report(vec![(ModuleId::Fsm, vec!["ok"])]))
            .await
            .unwrap();

        assert_eq!(meta.name.to_string(), format!("{}-assessment.csv", session_id));
        let written = std::fs::read_to_string(dir.path().join(meta.name.to_string())).unwrap();
        assert!(written.contains("Acme Corp,2024-01-15,fsm,ok"));
    }
}
