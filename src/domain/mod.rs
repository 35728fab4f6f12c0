//! Domain layer - workflow state, module registry, and report model.
//!
//! Pure types and rules; no I/O.

pub mod foundation;
pub mod registry;
pub mod report;
pub mod workflow;
