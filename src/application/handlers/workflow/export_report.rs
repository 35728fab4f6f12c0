//! ExportReportHandler - runs every exporter over a completed workflow's report.

use std::sync::Arc;

use futures::future::join_all;

use crate::domain::foundation::SessionId;
use crate::domain::report::{ArtifactKind, ExportFailure, ReportAggregator};
use crate::domain::workflow::WorkflowError;
use crate::ports::{ArtifactMetadata, ReportExporter, SessionStore};

#[derive(Debug, Clone)]
pub struct ExportReportCommand {
    pub session_id: SessionId,
}

/// Result of a single exporter.
#[derive(Debug, Clone)]
pub struct ExporterOutcome {
    pub exporter: ArtifactKind,
    pub result: Result<ArtifactMetadata, ExportFailure>,
}

impl ExporterOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone)]
pub struct ExportReportResult {
    pub session_id: SessionId,
    /// One entry per configured exporter, in configuration order.
    pub outcomes: Vec<ExporterOutcome>,
}

impl ExportReportResult {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(ExporterOutcome::is_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ExportFailure> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err())
    }
}

/// Handler for report export.
///
/// Exporters run concurrently over the same report; one failing never
/// prevents or masks the other.
pub struct ExportReportHandler {
    store: Arc<dyn SessionStore>,
    exporters: Vec<Arc<dyn ReportExporter>>,
}

impl ExportReportHandler {
    pub fn new(store: Arc<dyn SessionStore>, exporters: Vec<Arc<dyn ReportExporter>>) -> Self {
        Self { store, exporters }
    }

    /// # Errors
    ///
    /// `IncompleteWorkflow` before any exporter runs. Exporter failures are
    /// reported in the result, not as an error.
    pub async fn handle(&self, cmd: ExportReportCommand) -> Result<ExportReportResult, WorkflowError> {
        let state = self.store.get(cmd.session_id).await?;
        let report = ReportAggregator::build(&state)?;
        let session_id = cmd.session_id;

        let runs = self.exporters.iter().map(|exporter| {
            let report = &report;
            async move {
                let kind = exporter.kind();
                let result = exporter
                    .export(session_id, report)
                    .await
                    .map_err(|e| ExportFailure::new(kind, session_id, e.to_string()));
                match &result {
                    Ok(meta) => tracing::info!(
                        session_id = %session_id,
                        exporter = %kind,
                        artifact = %meta.name,
                        size_bytes = meta.size_bytes,
                        "Export succeeded"
                    ),
                    Err(failure) => tracing::error!(
                        session_id = %session_id,
                        exporter = %kind,
                        reason = %failure.reason,
                        "Export failed"
                    ),
                }
                ExporterOutcome {
                    exporter: kind,
                    result,
                }
            }
        });

        let outcomes = join_all(runs).await;
        Ok(ExportReportResult {
            session_id,
            outcomes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::workflow::test_support::{answers, store_with};
    use crate::domain::foundation::{ModuleId, Timestamp};
    use crate::domain::report::{ArtifactFormat, ArtifactName, ReportDocument};
    use crate::ports::ExportError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockExporter {
        kind: ArtifactKind,
        format: ArtifactFormat,
        fail_with: Option<ExportError>,
        seen: Mutex<Vec<ReportDocument>>,
    }

    impl MockExporter {
        fn ok(kind: ArtifactKind, format: ArtifactFormat) -> Arc<Self> {
            Arc::new(Self {
                kind,
                format,
                fail_with: None,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(kind: ArtifactKind, format: ArtifactFormat, err: ExportError) -> Arc<Self> {
            Arc::new(Self {
                kind,
                format,
                fail_with: Some(err),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ReportExporter for MockExporter {
        fn kind(&self) -> ArtifactKind {
            self.kind
        }

        fn format(&self) -> ArtifactFormat {
            self.format
        }

        async fn export(
            &self,
            session_id: SessionId,
            report: &ReportDocument,
        ) -> Result<ArtifactMetadata, ExportError> {
            self.seen.lock().unwrap().push(report.clone());
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            Ok(ArtifactMetadata {
                name: ArtifactName::new(session_id, self.format),
                size_bytes: 1,
                modified_at: Timestamp::now(),
                checksum: "00".repeat(32),
            })
        }
    }

    async fn completed_store() -> (Arc<crate::adapters::storage::InMemorySessionStore>, SessionId) {
        let (store, id) = store_with(vec![ModuleId::Fsm]).await;
        store.record_answers(id, ModuleId::Fsm, answers(&["ok"])).await.unwrap();
        store.advance_cursor(id, 0).await.unwrap();
        (store, id)
    }

    #[tokio::test]
    async fn both_exporters_receive_the_same_report() {
        let (store, id) = completed_store().await;
        let sheet = MockExporter::ok(ArtifactKind::Spreadsheet, ArtifactFormat::Csv);
        let doc = MockExporter::ok(ArtifactKind::Document, ArtifactFormat::Html);
        let handler = ExportReportHandler::new(store, vec![sheet.clone(), doc.clone()]);

        let result = handler.handle(ExportReportCommand { session_id: id }).await.unwrap();

        assert!(result.all_succeeded());
        assert_eq!(result.outcomes.len(), 2);
        assert_eq!(*sheet.seen.lock().unwrap(), *doc.seen.lock().unwrap());
    }

    #[tokio::test]
    async fn one_failure_does_not_mask_the_other() {
        let (store, id) = completed_store().await;
        let sheet = MockExporter::ok(ArtifactKind::Spreadsheet, ArtifactFormat::Csv);
        let doc = MockExporter::failing(
            ArtifactKind::Document,
            ArtifactFormat::Html,
            ExportError::missing_field("prepared_by"),
        );
        let handler = ExportReportHandler::new(store, vec![sheet, doc]);

        let result = handler.handle(ExportReportCommand { session_id: id }).await.unwrap();

        assert!(!result.all_succeeded());
        assert!(result.outcomes[0].is_success());
        let failures: Vec<_> = result.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].exporter, ArtifactKind::Document);
        assert_eq!(failures[0].session_id, id);
        assert!(failures[0].reason.contains("prepared_by"));
    }

    #[tokio::test]
    async fn incomplete_workflow_runs_no_exporter() {
        let (store, id) = store_with(vec![ModuleId::Fsm]).await;
        let sheet = MockExporter::ok(ArtifactKind::Spreadsheet, ArtifactFormat::Csv);
        let handler = ExportReportHandler::new(store, vec![sheet.clone()]);

        let err = handler.handle(ExportReportCommand { session_id: id }).await.unwrap_err();

        assert!(matches!(err, WorkflowError::IncompleteWorkflow { .. }));
        assert!(sheet.seen.lock().unwrap().is_empty());
    }
}
