//! Durable storage contract for retention records.

use std::collections::HashMap;
use std::sync::Mutex;

/// Fire-and-forget key/value store for retained session state.
///
/// The engine only ever writes; restoring retained files at startup is the
/// host's side of the contract.
pub trait RetentionStore: Send + Sync {
    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);
}

/// In-memory store, the default backend and the one used by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read back a stored value.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl RetentionStore for MemoryStore {
    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}
