//! Key-value persistence.
//!
//! Saved teams live under a single key holding the whole list, the same way
//! the browser builder keeps them in local storage. Anything that can get
//! and set a string by key can back a [`TeamStore`](crate::store::TeamStore):
//!
//! - [`RedbStore`]: ACID on-disk store using redb (one `kv` table)
//! - [`MemoryStore`]: in-process map that counts writes

use crate::error::TeamResult;
use parking_lot::RwLock;
use redb::{Database, TableDefinition};
use std::path::Path;
use std::sync::Arc;

mod memory;

pub use memory::MemoryStore;

/// Table for all keys (key: store key, value: UTF-8 text)
const KV_TABLE: TableDefinition<&str, &str> = TableDefinition::new("kv");

/// String key-value store backing the team list.
pub trait KeyValueStore {
    /// Read a value. Absent keys are `Ok(None)`.
    fn get(&self, key: &str) -> TeamResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> TeamResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> TeamResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> TeamResult<()> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> TeamResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> TeamResult<()> {
        (**self).set(key, value)
    }
}

/// Key-value store using redb for ACID-compliant persistence
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<RwLock<Database>>,
}

impl RedbStore {
    /// Open or create a store at the given path.
    ///
    /// This will:
    /// - Create the parent directory if it doesn't exist
    /// - Initialize the database file
    /// - Create the `kv` table
    pub fn new(path: impl AsRef<Path>) -> TeamResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(KV_TABLE)?;
        }
        write_txn.commit()?;

        tracing::debug!(path = %path.display(), "Opened team database");

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
        })
    }

    /// Open the store inside a data directory (`<dir>/teams.redb`).
    pub fn open_dir(data_dir: impl AsRef<Path>) -> TeamResult<Self> {
        Self::new(data_dir.as_ref().join("teams.redb"))
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> TeamResult<Option<String>> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(KV_TABLE)?;

        Ok(table.get(key)?.map(|v| v.value().to_string()))
    }

    fn set(&self, key: &str, value: &str) -> TeamResult<()> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_and_get() {
        let temp_dir = tempdir().unwrap();
        let store = RedbStore::new(temp_dir.path().join("test.redb")).unwrap();

        assert_eq!(store.get("teams").unwrap(), None);
        store.set("teams", "[]").unwrap();
        assert_eq!(store.get("teams").unwrap().as_deref(), Some("[]"));

        store.set("teams", "[1]").unwrap();
        assert_eq!(store.get("teams").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = tempdir().unwrap();

        {
            let store = RedbStore::open_dir(temp_dir.path()).unwrap();
            store.set("k", "チーム").unwrap();
        }

        let store = RedbStore::open_dir(temp_dir.path()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("チーム"));
    }

    #[test]
    fn test_creates_parent_directories() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("teams.redb");
        let store = RedbStore::new(&nested).unwrap();
        store.set("k", "v").unwrap();
        assert!(nested.exists());
    }
}
