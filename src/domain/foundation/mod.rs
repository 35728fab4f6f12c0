//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the assessment workflow.

mod errors;
mod ids;
mod module_id;
mod state_machine;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::SessionId;
pub use module_id::ModuleId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
