//! YAML Module Registry Loader
//!
//! Reads the module catalogue from a YAML file at start-up:
//!
//! ```yaml
//! modules:
//!   - id: fsm
//!     title: Forcepoint Security Manager   # optional
//!     questions:
//!       - key: version
//!         prompt: Which version is installed?
//! ```
//!
//! Structural problems are configuration errors; the caller is expected to
//! abort start-up on any of them.

use std::path::Path;

use serde::Deserialize;

use crate::config::ConfigError;
use crate::domain::foundation::ModuleId;
use crate::domain::registry::{ModuleDefinition, ModuleRegistry, Question};

#[derive(Debug, Deserialize)]
struct RegistryFile {
    modules: Option<Vec<ModuleEntry>>,
}

#[derive(Debug, Deserialize)]
struct ModuleEntry {
    id: String,
    title: Option<String>,
    #[serde(default)]
    questions: Vec<QuestionEntry>,
}

#[derive(Debug, Deserialize)]
struct QuestionEntry {
    key: String,
    prompt: String,
}

/// Load and validate the module registry from a YAML file.
pub fn load_registry(path: impl AsRef<Path>) -> Result<ModuleRegistry, ConfigError> {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::read(&origin, e.to_string()))?;

    let registry = parse_registry(&content, &origin)?;
    tracing::info!(path = %origin, modules = registry.len(), "Loaded module registry");
    Ok(registry)
}

/// Parse and validate registry YAML; `origin` names the source in errors.
pub fn parse_registry(content: &str, origin: &str) -> Result<ModuleRegistry, ConfigError> {
    let file: RegistryFile =
        serde_yaml::from_str(content).map_err(|e| ConfigError::parse(origin, e.to_string()))?;

    let entries = file
        .modules
        .ok_or_else(|| ConfigError::missing_section(origin, "modules"))?;

    let definitions = entries
        .into_iter()
        .map(|entry| {
            let id: ModuleId = entry
                .id
                .parse()
                .map_err(|e: crate::domain::foundation::ValidationError| {
                    ConfigError::invalid_entry(origin, e.to_string())
                })?;

            let questions = entry
                .questions
                .into_iter()
                .map(|q| Question::new(q.key, q.prompt))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ConfigError::invalid_entry(origin, format!("module '{}': {}", id, e)))?;

            Ok(ModuleDefinition::new(id, entry.title, questions))
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    ModuleRegistry::from_definitions(definitions)
        .map_err(|e| ConfigError::invalid_entry(origin, e.to_string()))
}
