//! Shared fixtures for workflow handler tests.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::adapters::storage::InMemorySessionStore;
use crate::domain::foundation::{ModuleId, SessionId};
use crate::domain::registry::{ModuleDefinition, ModuleRegistry, Question};
use crate::ports::SessionStore;

pub fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

pub fn answers(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Registry containing every module except `DlpEsg`.
pub fn registry() -> Arc<ModuleRegistry> {
    let defs = ModuleId::all()
        .iter()
        .copied()
        .filter(|m| *m != ModuleId::DlpEsg)
        .map(|id| {
            ModuleDefinition::new(
                id,
                None,
                vec![Question::new("status", "Current status?").unwrap()],
            )
        });
    Arc::new(ModuleRegistry::from_definitions(defs).unwrap())
}

pub async fn store_with(modules: Vec<ModuleId>) -> (Arc<InMemorySessionStore>, SessionId) {
    let store = Arc::new(InMemorySessionStore::new());
    let id = store
        .create("Acme Corp".to_string(), date(), modules)
        .await
        .unwrap();
    (store, id)
}
