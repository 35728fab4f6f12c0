//! Export failure reporting.

use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::SessionId;

use super::ArtifactKind;

/// One exporter failed; reported alongside the other exporter's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{exporter} export failed for session {session_id}: {reason}")]
pub struct ExportFailure {
    pub exporter: ArtifactKind,
    pub session_id: SessionId,
    pub reason: String,
}

impl ExportFailure {
    pub fn new(exporter: ArtifactKind, session_id: SessionId, reason: impl Into<String>) -> Self {
        Self {
            exporter,
            session_id,
            reason: reason.into(),
        }
    }
}
