//! ModuleRegistry - read-only lookup from module id to its definition.

use std::collections::BTreeMap;

use crate::domain::foundation::{ModuleId, SessionId, ValidationError};
use crate::domain::workflow::WorkflowError;

use super::ModuleDefinition;

/// Process-wide catalogue of module definitions.
///
/// Built once at start-up and shared behind an `Arc`; never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: BTreeMap<ModuleId, ModuleDefinition>,
}

impl ModuleRegistry {
    /// Builds a registry, rejecting duplicate module ids.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ModuleDefinition>,
    ) -> Result<Self, ValidationError> {
        let mut modules = BTreeMap::new();
        for def in definitions {
            let id = def.id;
            if modules.insert(id, def).is_some() {
                return Err(ValidationError::invalid_format(
                    "modules",
                    format!("module '{}' is defined more than once", id),
                ));
            }
        }
        Ok(Self { modules })
    }

    /// All definitions in catalogue order.
    pub fn list_modules(&self) -> Vec<&ModuleDefinition> {
        self.modules.values().collect()
    }

    pub fn get(&self, id: ModuleId) -> Option<&ModuleDefinition> {
        self.modules.get(&id)
    }

    /// Looks up a module, treating absence as a configuration defect.
    pub fn resolve(
        &self,
        id: ModuleId,
        session_id: Option<SessionId>,
    ) -> Result<&ModuleDefinition, WorkflowError> {
        self.get(id)
            .ok_or_else(|| WorkflowError::unknown_module(session_id, id))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
