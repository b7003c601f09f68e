// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Durable key-value store backed by redb (pure Rust, ACID).
//!
//! A general-purpose settings store: callers share one table and keep their
//! data apart with key prefixes. The persistent cache tier lives under its own
//! namespace, so clearing it never touches anything else stored here.
//!
//! ## Table Layout
//!
//! - `kv`: string key → raw bytes

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

// =============================================================================
// Table Definitions
// =============================================================================

/// Single table: key → value bytes.
const KV: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

pub type KvResult<T> = Result<T, KvError>;

// =============================================================================
// Contract
// =============================================================================

/// Narrow key-value contract used by the persistent cache tier.
///
/// Implementations are synchronous; async callers run them on the blocking
/// pool.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> KvResult<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> KvResult<()>;

    /// Remove `key`. Absent keys are not an error.
    fn remove(&self, key: &str) -> KvResult<()>;

    /// All keys starting with `prefix`, in ascending order.
    fn keys_with_prefix(&self, prefix: &str) -> KvResult<Vec<String>>;

    /// Remove every key starting with `prefix`, returning how many were removed.
    fn remove_prefix(&self, prefix: &str) -> KvResult<usize>;
}

// =============================================================================
// RedbStore
// =============================================================================

/// Embedded ACID key-value store.
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> KvResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        // Pre-create the table so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(KV)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> KvResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(KV)?;
        Ok(table.get(key)?.map(|v| v.value().to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> KvResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> KvResult<Vec<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(KV)?;
        collect_prefixed(&table, prefix)
    }

    fn remove_prefix(&self, prefix: &str) -> KvResult<usize> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(KV)?;
            let keys = collect_prefixed(&table, prefix)?;
            for key in &keys {
                table.remove(key.as_str())?;
            }
            keys.len()
        };
        write_txn.commit()?;
        Ok(removed)
    }
}

/// Range-scan keys from `prefix` forward, stopping at the first non-match.
fn collect_prefixed<T>(table: &T, prefix: &str) -> KvResult<Vec<String>>
where
    T: ReadableTable<&'static str, &'static [u8]>,
{
    let mut keys = Vec::new();
    for entry in table.range(prefix..)? {
        let (key, _) = entry?;
        let key = key.value();
        if !key.starts_with(prefix) {
            break;
        }
        keys.push(key.to_string());
    }
    Ok(keys)
}

// =============================================================================
// MemoryStore
// =============================================================================

/// Volatile store with the same contract, for tests and cache-only sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> KvResult<Option<Vec<u8>>> {
        let entries = self.entries.lock().map_err(|_| KvError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> KvResult<()> {
        let mut entries = self.entries.lock().map_err(|_| KvError::Poisoned)?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        let mut entries = self.entries.lock().map_err(|_| KvError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> KvResult<Vec<String>> {
        let entries = self.entries.lock().map_err(|_| KvError::Poisoned)?;
        Ok(entries
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }

    fn remove_prefix(&self, prefix: &str) -> KvResult<usize> {
        let mut entries = self.entries.lock().map_err(|_| KvError::Poisoned)?;
        let before = entries.len();
        entries.retain(|k, _| !k.starts_with(prefix));
        Ok(before - entries.len())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_db() -> (RedbStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = RedbStore::open(&dir.path().join("nested").join("test.redb")).unwrap();
        (db, dir)
    }

    fn exercise(store: &dyn KeyValueStore) {
        assert!(store.get("missing").unwrap().is_none());

        store.set("cache:a", b"1").unwrap();
        store.set("cache:b", b"2").unwrap();
        store.set("settings:theme", b"dark").unwrap();
        assert_eq!(store.get("cache:a").unwrap(), Some(b"1".to_vec()));

        store.set("cache:a", b"3").unwrap();
        assert_eq!(store.get("cache:a").unwrap(), Some(b"3".to_vec()));

        assert_eq!(
            store.keys_with_prefix("cache:").unwrap(),
            vec!["cache:a".to_string(), "cache:b".to_string()]
        );

        store.remove("cache:b").unwrap();
        store.remove("cache:b").unwrap();
        assert!(store.get("cache:b").unwrap().is_none());

        assert_eq!(store.remove_prefix("cache:").unwrap(), 1);
        assert!(store.keys_with_prefix("cache:").unwrap().is_empty());
        assert_eq!(store.get("settings:theme").unwrap(), Some(b"dark".to_vec()));
    }

    #[test]
    fn redb_store_contract() {
        let (db, _dir) = temp_db();
        exercise(&db);
    }

    #[test]
    fn memory_store_contract() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn redb_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persist.redb");
        {
            let db = RedbStore::open(&path).unwrap();
            db.set("cache:k", b"v").unwrap();
        }
        let db = RedbStore::open(&path).unwrap();
        assert_eq!(db.get("cache:k").unwrap(), Some(b"v".to_vec()));
    }
}
