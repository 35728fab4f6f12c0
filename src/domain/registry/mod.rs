//! Module registry - static catalogue of module question sets.

mod definition;
mod module_registry;

pub use definition::{ModuleDefinition, Question};
pub use module_registry::ModuleRegistry;
