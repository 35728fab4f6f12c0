//! Workflow module - per-session state and the module flow state machine.

mod errors;
mod state;
mod step;

pub use errors::WorkflowError;
pub use state::{Submission, WorkflowState};
pub use step::WorkflowStep;
