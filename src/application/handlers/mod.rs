//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod workflow;

pub use workflow::{
    // Commands
    ExportReportCommand, ResetWorkflowCommand, StartWorkflowCommand, SubmitAnswersCommand,
    // Queries
    FetchArtifactQuery, GetCurrentModuleQuery, GetSummaryQuery, GetWorkflowQuery,
    ListArtifactsQuery,
    // Handlers
    ExportReportHandler, FetchArtifactHandler, GetCurrentModuleHandler, GetSummaryHandler,
    GetWorkflowHandler, ListArtifactsHandler, PurgeIdleSessionsHandler, ResetWorkflowHandler,
    StartWorkflowHandler, SubmitAnswersHandler,
    // Results and views
    ArtifactContent, CurrentModuleView, ExportReportResult, ExporterOutcome, StartWorkflowResult,
    SubmitAnswersResult, WorkflowProgress,
};
