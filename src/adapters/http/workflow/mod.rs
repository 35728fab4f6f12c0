//! Workflow HTTP adapter - REST API for assessment workflows and their reports.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{WorkflowApiError, WorkflowAppState};
pub use routes::{workflow_router, workflow_routes};
