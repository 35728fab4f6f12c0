//! Workflow configuration: module and template sources, session lifetime

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound on the idle-session TTL (one year).
pub const MAX_SESSION_TTL_MINUTES: i64 = 365 * 24 * 60;

/// Workflow configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowConfig {
    /// YAML file declaring each module's questions
    #[serde(default = "default_modules_path")]
    pub modules_path: PathBuf,

    /// YAML file declaring the report document template
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,

    /// Idle sessions older than this are discarded
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: i64,

    /// How often the idle-session purge runs
    #[serde(default = "default_purge_interval")]
    pub purge_interval_secs: u64,
}

impl WorkflowConfig {
    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval_secs)
    }

    /// Validate workflow configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.modules_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("workflow.modules_path"));
        }
        if self.template_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("workflow.template_path"));
        }
        if !(1..=MAX_SESSION_TTL_MINUTES).contains(&self.session_ttl_minutes) {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.purge_interval_secs == 0 {
            return Err(ValidationError::InvalidPurgeInterval);
        }
        Ok(())
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            modules_path: default_modules_path(),
            template_path: default_template_path(),
            session_ttl_minutes: default_session_ttl(),
            purge_interval_secs: default_purge_interval(),
        }
    }
}

fn default_modules_path() -> PathBuf {
    PathBuf::from("config/modules.yaml")
}

fn default_template_path() -> PathBuf {
    PathBuf::from("config/report_template.yaml")
}

fn default_session_ttl() -> i64 {
    120
}

fn default_purge_interval() -> u64 {
    300
}
