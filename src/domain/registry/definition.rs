//! Module definitions: the question set presented for each module.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ModuleId, ValidationError};

/// One question presented while a module is in focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub key: String,
    pub prompt: String,
}

impl Question {
    pub fn new(key: impl Into<String>, prompt: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ValidationError::empty_field("question.key"));
        }
        Ok(Self {
            key,
            prompt: prompt.into(),
        })
    }
}

/// Immutable definition of a module's question set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDefinition {
    pub id: ModuleId,
    pub title: String,
    pub questions: Vec<Question>,
}

impl ModuleDefinition {
    /// Creates a definition, falling back to the module's display name for the title.
    pub fn new(id: ModuleId, title: Option<String>, questions: Vec<Question>) -> Self {
        Self {
            id,
            title: title.unwrap_or_else(|| id.display_name().to_string()),
            questions,
        }
    }
}
