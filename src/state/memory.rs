//! In-memory state store

use super::{StateError, StateStore};
use std::collections::HashMap;
use std::sync::Mutex;

/// Non-durable store for dry runs and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StateError> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(records.get(key).cloned())
    }

    fn save(&self, key: &str, contents: &str) -> Result<(), StateError> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}
