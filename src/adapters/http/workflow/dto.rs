//! Request and response bodies for workflow endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::{ExportReportResult, StartWorkflowResult, SubmitAnswersResult, WorkflowProgress};
use crate::domain::foundation::{ErrorCode, ModuleId, SessionId, Timestamp};
use crate::domain::registry::{ModuleDefinition, Question};
use crate::domain::report::{ArtifactFormat, ArtifactKind, ExportFailure, ReportDocument};
use crate::domain::workflow::WorkflowStep;
use crate::ports::ArtifactMetadata;

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/workflows`.
#[derive(Debug, Clone, Deserialize)]
pub struct StartWorkflowRequest {
    pub subject_name: String,
    /// ISO-8601 calendar date, `YYYY-MM-DD`.
    pub assessment_date: String,
    #[serde(default)]
    pub selected_modules: Vec<String>,
}

/// Body of `POST /api/workflows/:id/answers`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswersRequest {
    pub module: String,
    #[serde(default)]
    pub answers: Vec<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Module catalogue
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub key: String,
    pub prompt: String,
}

impl From<&Question> for QuestionResponse {
    fn from(q: &Question) -> Self {
        Self {
            key: q.key.clone(),
            prompt: q.prompt.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleResponse {
    pub id: ModuleId,
    pub title: String,
    pub questions: Vec<QuestionResponse>,
}

impl From<&ModuleDefinition> for ModuleResponse {
    fn from(def: &ModuleDefinition) -> Self {
        Self {
            id: def.id,
            title: def.title.clone(),
            questions: def.questions.iter().map(QuestionResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleCatalogResponse {
    pub modules: Vec<ModuleResponse>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Workflow
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartWorkflowResponse {
    pub session_id: SessionId,
    pub step: WorkflowStep,
}

impl From<StartWorkflowResult> for StartWorkflowResponse {
    fn from(result: StartWorkflowResult) -> Self {
        Self {
            session_id: result.session_id,
            step: result.step,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentModuleResponse {
    pub session_id: SessionId,
    pub index: usize,
    pub total: usize,
    pub module: ModuleResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswersResponse {
    pub step: WorkflowStep,
    pub next_module: Option<ModuleId>,
    pub replayed: bool,
}

impl From<SubmitAnswersResult> for SubmitAnswersResponse {
    fn from(result: SubmitAnswersResult) -> Self {
        Self {
            step: result.step,
            next_module: result.next_module,
            replayed: result.replayed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowProgressResponse {
    pub session_id: SessionId,
    pub subject_name: String,
    pub assessment_date: NaiveDate,
    pub selected_modules: Vec<ModuleId>,
    pub step: WorkflowStep,
    pub visited: usize,
    pub total: usize,
    pub current_module: Option<ModuleId>,
    pub complete: bool,
    pub updated_at: Timestamp,
}

impl From<WorkflowProgress> for WorkflowProgressResponse {
    fn from(p: WorkflowProgress) -> Self {
        Self {
            complete: p.step.is_complete(),
            session_id: p.session_id,
            subject_name: p.subject_name,
            assessment_date: p.assessment_date,
            selected_modules: p.selected_modules,
            step: p.step,
            visited: p.visited,
            total: p.total,
            current_module: p.current_module,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub session_id: SessionId,
    #[serde(flatten)]
    pub report: ReportDocument,
}

// ════════════════════════════════════════════════════════════════════════════════
// Export and artifacts
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactResponse {
    pub name: String,
    pub format: ArtifactFormat,
    pub size_bytes: u64,
    pub sha256: String,
    pub modified_at: Timestamp,
    pub url: String,
}

impl From<&ArtifactMetadata> for ArtifactResponse {
    fn from(meta: &ArtifactMetadata) -> Self {
        let name = meta.name.to_string();
        Self {
            url: format!("/api/artifacts/{}", name),
            name,
            format: meta.name.format,
            size_bytes: meta.size_bytes,
            sha256: meta.checksum.clone(),
            modified_at: meta.modified_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactListResponse {
    pub session_id: SessionId,
    pub artifacts: Vec<ArtifactResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExporterOutcomeResponse {
    pub exporter: ArtifactKind,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<ArtifactResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ExportFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportResponse {
    pub session_id: SessionId,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub outcomes: Vec<ExporterOutcomeResponse>,
}

impl From<ExportReportResult> for ExportResponse {
    fn from(result: ExportReportResult) -> Self {
        let success = result.all_succeeded();
        let outcomes = result
            .outcomes
            .into_iter()
            .map(|outcome| match outcome.result {
                Ok(meta) => ExporterOutcomeResponse {
                    exporter: outcome.exporter,
                    status: OutcomeStatus::Succeeded,
                    artifact: Some(ArtifactResponse::from(&meta)),
                    error: None,
                },
                Err(failure) => ExporterOutcomeResponse {
                    exporter: outcome.exporter,
                    status: OutcomeStatus::Failed,
                    artifact: None,
                    error: Some(failure),
                },
            })
            .collect();

        Self {
            session_id: result.session_id,
            success,
            code: (!success).then(|| ErrorCode::ExportFailed.to_string()),
            outcomes,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════════

/// JSON error body shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::ArtifactName;

    #[test]
    fn start_request_defaults_to_empty_selection() {
        let req: StartWorkflowRequest = serde_json::from_str(
            r#"{"subject_name": "Acme Corp", "assessment_date": "2024-01-15"}"#,
        )
        .unwrap();
        assert!(req.selected_modules.is_empty());
    }

    #[test]
    fn step_serializes_with_state_tag() {
        let json = serde_json::to_value(SubmitAnswersResponse {
            step: WorkflowStep::InModule(1),
            next_module: Some(ModuleId::WebHybrid),
            replayed: false,
        })
        .unwrap();

        assert_eq!(json["step"]["state"], "in_module");
        assert_eq!(json["step"]["index"], 1);
        assert_eq!(json["next_module"], "web_hybrid");
    }

    #[test]
    fn artifact_response_links_to_download() {
        let id = SessionId::new();
        let meta = ArtifactMetadata {
            name: ArtifactName::new(id, ArtifactFormat::Csv),
            size_bytes: 42,
            modified_at: Timestamp::now(),
            checksum: "ab".repeat(32),
        };

        let response = ArtifactResponse::from(&meta);
        assert_eq!(response.url, format!("/api/artifacts/{}-assessment.csv", id));
        assert_eq!(response.sha256.len(), 64);
    }

    #[test]
    fn partial_export_carries_failure_code() {
        use crate::application::handlers::ExporterOutcome;

        let session_id = SessionId::new();
        let meta = ArtifactMetadata {
            name: ArtifactName::new(session_id, ArtifactFormat::Csv),
            size_bytes: 10,
            modified_at: Timestamp::now(),
            checksum: "cd".repeat(32),
        };
        let result = ExportReportResult {
            session_id,
            outcomes: vec![
                ExporterOutcome {
                    exporter: ArtifactKind::Spreadsheet,
                    result: Ok(meta),
                },
                ExporterOutcome {
                    exporter: ArtifactKind::Document,
                    result: Err(ExportFailure::new(ArtifactKind::Document, session_id, "pandoc missing")),
                },
            ],
        };

        let json = serde_json::to_value(ExportResponse::from(result)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "EXPORT_FAILED");
        assert_eq!(json["outcomes"][0]["status"], "succeeded");
        assert_eq!(json["outcomes"][1]["status"], "failed");
    }

    #[test]
    fn error_response_omits_empty_details() {
        let json = serde_json::to_string(&ErrorResponse::new("INVALID_MODULE", "nope")).unwrap();
        assert!(!json.contains("details"));
    }
}
