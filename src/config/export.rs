//! Export configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Output format of the report document
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Self-contained HTML with print page breaks
    #[default]
    Html,
    /// PDF through Pandoc
    Pdf,
}

/// Export pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub document_format: DocumentFormat,

    /// Path to the pandoc executable; searched on PATH when unset
    pub pandoc_path: Option<String>,

    /// Timeout for PDF conversion in seconds
    #[serde(default = "default_pdf_timeout")]
    pub pdf_timeout_secs: u64,
}

impl ExportConfig {
    /// Validate export configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.pdf_timeout_secs == 0 || self.pdf_timeout_secs > 600 {
            return Err(ValidationError::InvalidPdfTimeout);
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            document_format: DocumentFormat::default(),
            pandoc_path: None,
            pdf_timeout_secs: default_pdf_timeout(),
        }
    }
}

fn default_pdf_timeout() -> u64 {
    30
}
