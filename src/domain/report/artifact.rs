//! Export artifact naming.
//!
//! Artifact names are parsed into typed values before they reach the
//! filesystem, so a request can only ever address `{session}-assessment.{ext}`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{SessionId, ValidationError};

const ARTIFACT_STEM: &str = "assessment";

/// File formats the export pipeline can publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactFormat {
    /// Comma-separated spreadsheet.
    Csv,
    /// Self-contained HTML document.
    Html,
    /// PDF document.
    Pdf,
}

impl ArtifactFormat {
    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ArtifactFormat::Csv => "text/csv; charset=utf-8",
            ArtifactFormat::Html => "text/html; charset=utf-8",
            ArtifactFormat::Pdf => "application/pdf",
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactFormat::Csv => "csv",
            ArtifactFormat::Html => "html",
            ArtifactFormat::Pdf => "pdf",
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        match self {
            ArtifactFormat::Csv => ArtifactKind::Spreadsheet,
            ArtifactFormat::Html | ArtifactFormat::Pdf => ArtifactKind::Document,
        }
    }
}

impl FromStr for ArtifactFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ArtifactFormat::Csv),
            "html" | "htm" => Ok(ArtifactFormat::Html),
            "pdf" => Ok(ArtifactFormat::Pdf),
            _ => Err(ValidationError::invalid_format(
                "format",
                format!("unsupported artifact format '{}'", s),
            )),
        }
    }
}

/// Which exporter produced an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Spreadsheet,
    Document,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Spreadsheet => write!(f, "spreadsheet"),
            ArtifactKind::Document => write!(f, "document"),
        }
    }
}

/// Published artifact name: `{session_id}-assessment.{ext}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactName {
    pub session_id: SessionId,
    pub format: ArtifactFormat,
}

impl ArtifactName {
    pub fn new(session_id: SessionId, format: ArtifactFormat) -> Self {
        Self { session_id, format }
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}.{}",
            self.session_id,
            ARTIFACT_STEM,
            self.format.extension()
        )
    }
}

impl FromStr for ArtifactName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || {
            ValidationError::invalid_format(
                "artifact",
                format!("'{}' is not of the form <session>-{}.<ext>", s, ARTIFACT_STEM),
            )
        };

        let (stem, ext) = s.rsplit_once('.').ok_or_else(malformed)?;
        let session = stem
            .strip_suffix(ARTIFACT_STEM)
            .and_then(|rest| rest.strip_suffix('-'))
            .ok_or_else(malformed)?;
        let session_id = session.parse::<SessionId>().map_err(|_| malformed())?;
        let format = ext.parse::<ArtifactFormat>()?;

        // Only the canonical spelling addresses a file.
        let name = Self { session_id, format };
        if name.to_string() != s {
            return Err(malformed());
        }
        Ok(name)
    }
}
