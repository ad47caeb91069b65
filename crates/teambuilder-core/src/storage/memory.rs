//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use super::KeyValueStore;
use crate::error::TeamResult;

/// Map-backed store. Counts every `set` so callers can observe writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls so far
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    /// Raw value at a key, bypassing the trait
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> TeamResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> TeamResult<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_writes() {
        let store = MemoryStore::new();
        assert_eq!(store.writes(), 0);
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "a").unwrap();
        store.set("k", "b").unwrap();
        assert_eq!(store.writes(), 2);
        assert_eq!(store.raw("k").as_deref(), Some("b"));
        assert_eq!(store.writes(), 2);
    }
}
