//! Registry adapters - load the module catalogue from configuration.

mod yaml_registry_loader;

pub use yaml_registry_loader::{load_registry, parse_registry};
