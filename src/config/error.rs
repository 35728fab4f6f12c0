//! Configuration error types

use thiserror::Error;

/// Errors that can occur while loading start-up configuration.
///
/// Any of these is fatal: the process must not serve traffic.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Cannot read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Cannot parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("{path} is missing required top-level section '{section}'")]
    MissingSection { path: String, section: &'static str },

    #[error("{path} has an invalid entry: {message}")]
    InvalidEntry { path: String, message: String },
}

impl ConfigError {
    pub fn read(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Read {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn missing_section(path: impl Into<String>, section: &'static str) -> Self {
        Self::MissingSection {
            path: path.into(),
            section,
        }
    }

    pub fn invalid_entry(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEntry {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Session TTL must be between one minute and one year")]
    InvalidSessionTtl,

    #[error("Purge interval must be positive")]
    InvalidPurgeInterval,

    #[error("Invalid PDF conversion timeout")]
    InvalidPdfTimeout,
}
