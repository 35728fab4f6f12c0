//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `ASSESSMENT_FLOW` prefix
//! and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use assessment_flow::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reports are written to {}", config.storage.reports_dir.display());
//! ```

mod error;
mod export;
mod server;
mod storage;
mod workflow;

pub use error::{ConfigError, ValidationError};
pub use export::{DocumentFormat, ExportConfig};
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;
pub use workflow::WorkflowConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Artifact storage location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Module/template sources and session lifetime
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// Document export options
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ASSESSMENT_FLOW` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `ASSESSMENT_FLOW__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ASSESSMENT_FLOW__STORAGE__REPORTS_DIR=/srv/reports` -> `storage.reports_dir`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ASSESSMENT_FLOW")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.storage.validate()?;
        self.workflow.validate()?;
        self.export.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
