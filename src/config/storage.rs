//! Artifact storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where export artifacts are published
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory that receives the spreadsheet and document artifacts
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.reports_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.reports_dir"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            reports_dir: default_reports_dir(),
        }
    }
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("./reports")
}
