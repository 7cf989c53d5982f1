//! Retention of open files across restarts.

use std::sync::Arc;

use tracing::{debug, warn};

use tabflow_core::{RetentionRecord, RetentionStore};

use crate::strip::TabStrip;

/// Writes the open-file record to durable storage after every render cycle.
///
/// Only tabs with real file bindings contribute; scratch and virtual tabs
/// are skipped, as are files whose handle yields no token. The record is
/// overwritten wholesale each time - no diffing - so re-running with
/// unchanged state produces an identical write. An empty list is still
/// written, clearing stale state.
pub struct RetentionPersister {
    store: Arc<dyn RetentionStore>,
    key: String,
}

impl RetentionPersister {
    /// Create a persister writing under `key`.
    pub fn new(store: Arc<dyn RetentionStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Regenerate and write the retention record for `strip`.
    pub fn persist(&self, strip: &TabStrip) {
        let tokens = strip
            .iter()
            .filter_map(|tab| tab.binding.retain())
            .collect();
        let record = RetentionRecord::new(tokens);

        match serde_json::to_string(&record) {
            Ok(json) => {
                debug!("Persisting retention record: {} file(s)", record.files.len());
                self.store.set(&self.key, &json);
            }
            Err(e) => warn!("Failed to serialize retention record: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeFile;
    use tabflow_core::{MemoryStore, RetentionRecord, Tab};

    fn stored(store: &MemoryStore) -> RetentionRecord {
        serde_json::from_str(&store.get("retained").unwrap()).unwrap()
    }

    #[test]
    fn test_persist_real_files_only() {
        let store = Arc::new(MemoryStore::new());
        let persister = RetentionPersister::new(store.clone(), "retained");

        let mut strip = TabStrip::new();
        strip.append(Tab::scratch("untitled.txt"));
        strip.append(Tab::from_file("a".into(), FakeFile::shared("/p/a.txt")));
        strip.append(Tab::virtual_doc(
            "{}".into(),
            FakeFile::shared("ace"),
            "ace.json",
        ));
        strip.append(Tab::from_file("b".into(), FakeFile::shared("/p/b.txt")));

        persister.persist(&strip);

        let record = stored(&store);
        let tokens: Vec<&str> = record.files.iter().map(|t| t.as_str()).collect();
        assert_eq!(tokens, vec!["/p/a.txt", "/p/b.txt"]);
    }

    #[test]
    fn test_persist_skips_unretainable_handles() {
        let store = Arc::new(MemoryStore::new());
        let persister = RetentionPersister::new(store.clone(), "retained");

        let mut strip = TabStrip::new();
        strip.append(Tab::from_file(
            "x".into(),
            FakeFile::transient("/tmp/preview"),
        ));
        strip.append(Tab::from_file("a".into(), FakeFile::shared("/p/a.txt")));

        persister.persist(&strip);
        assert_eq!(stored(&store).files.len(), 1);
    }

    #[test]
    fn test_persist_empty_strip_clears_record() {
        let store = Arc::new(MemoryStore::new());
        let persister = RetentionPersister::new(store.clone(), "retained");
        store.set("retained", "{\"files\":[\"stale.txt\"]}");

        persister.persist(&TabStrip::new());
        assert!(stored(&store).is_empty());
    }

    #[test]
    fn test_persist_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let persister = RetentionPersister::new(store.clone(), "retained");

        let mut strip = TabStrip::new();
        strip.append(Tab::from_file("a".into(), FakeFile::shared("/p/a.txt")));

        persister.persist(&strip);
        let first = store.get("retained").unwrap();
        persister.persist(&strip);
        assert_eq!(store.get("retained").unwrap(), first);
    }
}
