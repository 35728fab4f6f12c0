//! HTTP adapters - REST API implementations.

pub mod workflow;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use workflow::{workflow_router, WorkflowApiError, WorkflowAppState};

/// GET /health - Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// All routes with their state applied, without middleware.
pub fn api_router(state: WorkflowAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", workflow_router())
        .with_state(state)
}

/// Production router: API routes plus CORS, request timeout, and tracing.
pub fn app_router(state: WorkflowAppState, server: &ServerConfig) -> Router {
    api_router(state)
        .layer(cors_layer(server))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .allowed_origins()
        .into_iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
