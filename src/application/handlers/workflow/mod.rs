//! Workflow command and query handlers.

mod export_report;
mod fetch_artifact;
mod get_current_module;
mod get_summary;
mod get_workflow;
mod list_artifacts;
mod purge_idle_sessions;
mod reset_workflow;
mod start_workflow;
mod submit_answers;

#[cfg(test)]
pub(crate) mod test_support;

pub use export_report::{
    ExportReportCommand, ExportReportHandler, ExportReportResult, ExporterOutcome,
};
pub use fetch_artifact::{ArtifactContent, FetchArtifactHandler, FetchArtifactQuery};
pub use get_current_module::{CurrentModuleView, GetCurrentModuleHandler, GetCurrentModuleQuery};
pub use get_summary::{GetSummaryHandler, GetSummaryQuery};
pub use get_workflow::{GetWorkflowHandler, GetWorkflowQuery, WorkflowProgress};
pub use list_artifacts::{ListArtifactsHandler, ListArtifactsQuery};
pub use purge_idle_sessions::PurgeIdleSessionsHandler;
pub use reset_workflow::{ResetWorkflowCommand, ResetWorkflowHandler};
pub use start_workflow::{StartWorkflowCommand, StartWorkflowHandler, StartWorkflowResult};
pub use submit_answers::{SubmitAnswersCommand, SubmitAnswersHandler, SubmitAnswersResult};
