//! HTTP handlers for workflow, export, and artifact endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use chrono::NaiveDate;
use serde_json::json;

use crate::application::handlers::{
    CurrentModuleView, ExportReportCommand, ExportReportHandler, FetchArtifactHandler,
    FetchArtifactQuery, GetCurrentModuleHandler, GetCurrentModuleQuery, GetSummaryHandler,
    GetSummaryQuery, GetWorkflowHandler, GetWorkflowQuery, ListArtifactsHandler,
    ListArtifactsQuery, ResetWorkflowCommand, ResetWorkflowHandler, StartWorkflowCommand,
    StartWorkflowHandler, SubmitAnswersCommand, SubmitAnswersHandler,
};
use crate::domain::foundation::{ErrorCode, ModuleId, SessionId, ValidationError};
use crate::domain::registry::ModuleRegistry;
use crate::domain::report::ArtifactName;
use crate::domain::workflow::WorkflowError;
use crate::ports::{ArtifactStorage, ReportExporter, SessionStore, StorageError};

use super::dto::{
    ArtifactListResponse, ArtifactResponse, CurrentModuleResponse, ErrorResponse, ExportResponse,
    ModuleCatalogResponse, ModuleResponse, StartWorkflowRequest, StartWorkflowResponse,
    SubmitAnswersRequest, SubmitAnswersResponse, SummaryResponse, WorkflowProgressResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for workflow endpoints; cloned per request.
#[derive(Clone)]
pub struct WorkflowAppState {
    pub session_store: Arc<dyn SessionStore>,
    pub registry: Arc<ModuleRegistry>,
    pub artifact_storage: Arc<dyn ArtifactStorage>,
    pub exporters: Vec<Arc<dyn ReportExporter>>,
}

impl WorkflowAppState {
    pub fn start_workflow_handler(&self) -> StartWorkflowHandler {
        StartWorkflowHandler::new(self.session_store.clone(), self.registry.clone())
    }

    pub fn current_module_handler(&self) -> GetCurrentModuleHandler {
        GetCurrentModuleHandler::new(self.session_store.clone(), self.registry.clone())
    }

    pub fn submit_answers_handler(&self) -> SubmitAnswersHandler {
        SubmitAnswersHandler::new(self.session_store.clone())
    }

    pub fn get_workflow_handler(&self) -> GetWorkflowHandler {
        GetWorkflowHandler::new(self.session_store.clone())
    }

    pub fn summary_handler(&self) -> GetSummaryHandler {
        GetSummaryHandler::new(self.session_store.clone())
    }

    pub fn export_handler(&self) -> ExportReportHandler {
        ExportReportHandler::new(self.session_store.clone(), self.exporters.clone())
    }

    pub fn reset_handler(&self) -> ResetWorkflowHandler {
        ResetWorkflowHandler::new(self.session_store.clone())
    }

    pub fn list_artifacts_handler(&self) -> ListArtifactsHandler {
        ListArtifactsHandler::new(self.artifact_storage.clone())
    }

    pub fn fetch_artifact_handler(&self) -> FetchArtifactHandler {
        FetchArtifactHandler::new(self.artifact_storage.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Path parsing
// ════════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, WorkflowApiError> {
    raw.parse::<SessionId>().map_err(|_| {
        WorkflowApiError::BadRequest(ValidationError::invalid_format(
            "session_id",
            format!("'{}' is not a valid session id", raw),
        ))
    })
}

fn parse_module(raw: &str) -> Result<ModuleId, WorkflowApiError> {
    raw.parse::<ModuleId>()
        .map_err(|_| WorkflowApiError::UnrecognizedModule(raw.to_string()))
}

fn parse_date(raw: &str) -> Result<NaiveDate, WorkflowApiError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        WorkflowApiError::BadRequest(ValidationError::invalid_format(
            "assessment_date",
            format!("'{}' is not a YYYY-MM-DD date", raw),
        ))
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Module catalogue
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/modules - Module catalogue in display order
pub async fn list_modules(State(state): State<WorkflowAppState>) -> impl IntoResponse {
    let modules = state
        .registry
        .list_modules()
        .into_iter()
        .map(ModuleResponse::from)
        .collect();
    Json(ModuleCatalogResponse { modules })
}

// ════════════════════════════════════════════════════════════════════════════════
// Workflow
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/workflows - Start a workflow over the selected modules
pub async fn start_workflow(
    State(state): State<WorkflowAppState>,
    Json(req): Json<StartWorkflowRequest>,
) -> Result<impl IntoResponse, WorkflowApiError> {
    let assessment_date = parse_date(&req.assessment_date)?;
    let selected_modules = req
        .selected_modules
        .iter()
        .map(|m| parse_module(m))
        .collect::<Result<Vec<_>, _>>()?;

    let result = state
        .start_workflow_handler()
        .handle(StartWorkflowCommand {
            subject_name: req.subject_name,
            assessment_date,
            selected_modules,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(StartWorkflowResponse::from(result))))
}

/// GET /api/workflows/:id/current - Module in focus, or redirect to the summary
pub async fn get_current_module(
    State(state): State<WorkflowAppState>,
    Path(session_id): Path<String>,
) -> Result<Response, WorkflowApiError> {
    let session_id = parse_session_id(&session_id)?;

    let view = state
        .current_module_handler()
        .handle(GetCurrentModuleQuery { session_id })
        .await?;

    Ok(match view {
        CurrentModuleView::InModule {
            index,
            total,
            definition,
            answers,
        } => Json(CurrentModuleResponse {
            session_id,
            index,
            total,
            module: ModuleResponse::from(&definition),
            answers,
        })
        .into_response(),
        CurrentModuleView::Complete => {
            Redirect::to(&format!("/api/workflows/{}/summary", session_id)).into_response()
        }
    })
}

/// POST /api/workflows/:id/answers - Submit answers for the module in focus
pub async fn submit_answers(
    State(state): State<WorkflowAppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SubmitAnswersRequest>,
) -> Result<impl IntoResponse, WorkflowApiError> {
    let session_id = parse_session_id(&session_id)?;
    let module = parse_module(&req.module)?;

    let result = state
        .submit_answers_handler()
        .handle(SubmitAnswersCommand {
            session_id,
            module,
            answers: req.answers,
        })
        .await?;

    Ok(Json(SubmitAnswersResponse::from(result)))
}

/// GET /api/workflows/:id - Progress view
pub async fn get_workflow(
    State(state): State<WorkflowAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, WorkflowApiError> {
    let session_id = parse_session_id(&session_id)?;

    let progress = state
        .get_workflow_handler()
        .handle(GetWorkflowQuery { session_id })
        .await?;

    Ok(Json(WorkflowProgressResponse::from(progress)))
}

/// GET /api/workflows/:id/summary - Aggregated report of a completed workflow
pub async fn get_summary(
    State(state): State<WorkflowAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, WorkflowApiError> {
    let session_id = parse_session_id(&session_id)?;

    let report = state
        .summary_handler()
        .handle(GetSummaryQuery { session_id })
        .await?;

    Ok(Json(SummaryResponse { session_id, report }))
}

/// DELETE /api/workflows/:id - Discard a workflow
pub async fn reset_workflow(
    State(state): State<WorkflowAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, WorkflowApiError> {
    let session_id = parse_session_id(&session_id)?;

    state
        .reset_handler()
        .handle(ResetWorkflowCommand { session_id })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Export and artifacts
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/workflows/:id/export - Run every exporter
///
/// 200 when all exporters succeed; 500 with per-exporter outcomes otherwise.
pub async fn export_report(
    State(state): State<WorkflowAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, WorkflowApiError> {
    let session_id = parse_session_id(&session_id)?;

    let result = state
        .export_handler()
        .handle(ExportReportCommand { session_id })
        .await?;

    let status = if result.all_succeeded() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    Ok((status, Json(ExportResponse::from(result))))
}

/// GET /api/workflows/:id/artifacts - Published artifacts for a session
pub async fn list_artifacts(
    State(state): State<WorkflowAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, WorkflowApiError> {
    let session_id = parse_session_id(&session_id)?;

    let artifacts = state
        .list_artifacts_handler()
        .handle(ListArtifactsQuery { session_id })
        .await?;

    Ok(Json(ArtifactListResponse {
        session_id,
        artifacts: artifacts.iter().map(ArtifactResponse::from).collect(),
    }))
}

/// GET /api/artifacts/:name - Download a published artifact
pub async fn fetch_artifact(
    State(state): State<WorkflowAppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, WorkflowApiError> {
    let name = name
        .parse::<ArtifactName>()
        .map_err(WorkflowApiError::BadRequest)?;

    let content = state
        .fetch_artifact_handler()
        .handle(FetchArtifactQuery { name })
        .await?;

    let disposition = format!("attachment; filename=\"{}\"", content.name);
    Ok((
        [
            (header::CONTENT_TYPE, content.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        content.bytes,
    ))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts workflow and storage errors to HTTP responses.
#[derive(Debug)]
pub enum WorkflowApiError {
    Workflow(WorkflowError),
    Storage(StorageError),
    /// Malformed path or body field.
    BadRequest(ValidationError),
    /// A module id that is not part of the catalogue.
    UnrecognizedModule(String),
}

impl From<WorkflowError> for WorkflowApiError {
    fn from(err: WorkflowError) -> Self {
        Self::Workflow(err)
    }
}

impl From<StorageError> for WorkflowApiError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

impl WorkflowApiError {
    fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            Self::Workflow(err) => {
                let status = match err {
                    WorkflowError::SessionNotFound(_) => StatusCode::NOT_FOUND,
                    WorkflowError::InvalidModule { .. } => StatusCode::CONFLICT,
                    WorkflowError::DuplicateModule(_) => StatusCode::BAD_REQUEST,
                    WorkflowError::UnknownModule { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    WorkflowError::IncompleteWorkflow { .. } => StatusCode::CONFLICT,
                    WorkflowError::Validation(_) => match err.code() {
                        ErrorCode::InvalidStateTransition => StatusCode::CONFLICT,
                        _ => StatusCode::BAD_REQUEST,
                    },
                    WorkflowError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.code())
            }
            Self::Storage(err) if err.is_not_found() => {
                (StatusCode::NOT_FOUND, ErrorCode::ArtifactNotFound)
            }
            Self::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::StorageError),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationFailed),
            Self::UnrecognizedModule(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::UnknownModule)
            }
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Workflow(WorkflowError::InvalidModule {
                session_id,
                module,
                expected,
            }) => Some(json!({
                "session_id": session_id,
                "module": module,
                "expected": expected,
            })),
            Self::Workflow(WorkflowError::UnknownModule { session_id, module }) => {
                Some(json!({ "session_id": session_id, "module": module }))
            }
            Self::Workflow(WorkflowError::IncompleteWorkflow {
                session_id,
                visited,
                total,
            }) => Some(json!({
                "session_id": session_id,
                "visited": visited,
                "total": total,
            })),
            Self::Workflow(WorkflowError::SessionNotFound(session_id)) => {
                Some(json!({ "session_id": session_id }))
            }
            Self::UnrecognizedModule(module) => Some(json!({ "module": module })),
            _ => None,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Workflow(err) => err.to_string(),
            Self::Storage(err) => err.to_string(),
            Self::BadRequest(err) => err.to_string(),
            Self::UnrecognizedModule(module) => format!("Unknown module '{}'", module),
        }
    }
}

impl IntoResponse for WorkflowApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(code = %code, error = %self.message(), "Request failed");
        }

        let mut body = ErrorResponse::new(code.to_string(), self.message());
        if let Some(details) = self.details() {
            body = body.with_details(details);
        }
        (status, Json(body)).into_response()
    }
}
