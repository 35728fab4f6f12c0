//! Axum router configuration for workflow endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    export_report, fetch_artifact, get_current_module, get_summary, get_workflow,
    list_artifacts, list_modules, reset_workflow, start_workflow, submit_answers,
    WorkflowAppState,
};

/// Workflow routes, mounted at `/api/workflows`.
///
/// - `POST /` - Start a workflow
/// - `GET /:id` - Progress view
/// - `DELETE /:id` - Discard a workflow
/// - `GET /:id/current` - Module in focus (303 to the summary once complete)
/// - `POST /:id/answers` - Submit answers for the module in focus
/// - `GET /:id/summary` - Aggregated report
/// - `POST /:id/export` - Run every exporter
/// - `GET /:id/artifacts` - Published artifacts
pub fn workflow_routes() -> Router<WorkflowAppState> {
    Router::new()
        .route("/", post(start_workflow))
        .route("/:id", get(get_workflow).delete(reset_workflow))
        .route("/:id/current", get(get_current_module))
        .route("/:id/answers", post(submit_answers))
        .route("/:id/summary", get(get_summary))
        .route("/:id/export", post(export_report))
        .route("/:id/artifacts", get(list_artifacts))
}

/// Complete workflow API, suitable for nesting under `/api`.
///
/// # Example
///
/// ```ignore
/// let app = Router::new()
///     .nest("/api", workflow_router())
///     .with_state(state);
/// ```
pub fn workflow_router() -> Router<WorkflowAppState> {
    Router::new()
        .route("/modules", get(list_modules))
        .route("/artifacts/:name", get(fetch_artifact))
        .nest("/workflows", workflow_routes())
}
