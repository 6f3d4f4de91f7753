//! redb-backed store
//!
//! A single `records` table holds every JSON record, keyed by its full
//! prefixed key. Prefix listing is a range scan starting at the prefix.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate` by default: once `commit()`
//! returns the write survives power loss, and the file is always in a
//! consistent state (copy-on-write with atomic pointer swap). Checkout relies
//! on [`KvStore::write_batch`] being one transaction here.

use super::{KvStore, StoreEntry, StoreOp, StoreResult};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Table for all records: key = prefixed key, value = JSON bytes
const RECORDS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("records");

/// Store backed by an embedded redb database
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path.as_ref())?;
        Self::init(db)
    }

    /// Open an in-memory database (tests, ephemeral terminals)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StoreResult<Self> {
        // Create the table so read transactions never see it missing
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(RECORDS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl KvStore for RedbStore {
    fn set(&self, key: &str, value: &Value) -> StoreResult<()> {
        let bytes = serde_json::to_vec(value)?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(RECORDS_TABLE)?;
            table.insert(key, bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RECORDS_TABLE)?;
        match table.get(key)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    fn list(&self, prefix: &str) -> StoreResult<Vec<StoreEntry>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RECORDS_TABLE)?;

        let mut entries = Vec::new();
        for result in table.range(prefix..)? {
            let (key, value) = result?;
            let key = key.value();
            if !key.starts_with(prefix) {
                break;
            }
            entries.push(StoreEntry {
                key: key.to_string(),
                value: serde_json::from_slice(value.value())?,
            });
        }
        Ok(entries)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(RECORDS_TABLE)?;
            table.remove(key)?;
        }
        txn.commit()?;
        Ok(())
    }

    /// All operations commit in one write transaction
    fn write_batch(&self, ops: Vec<StoreOp>) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(RECORDS_TABLE)?;
            for op in &ops {
                match op {
                    StoreOp::Set { key, value } => {
                        let bytes = serde_json::to_vec(value)?;
                        table.insert(key.as_str(), bytes.as_slice())?;
                    }
                    StoreOp::Remove { key } => {
                        table.remove(key.as_str())?;
                    }
                }
            }
        }
        txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rooms.redb");

        {
            let store = RedbStore::open(&path).unwrap();
            store.set("room:R01", &json!({ "id": "R01" })).unwrap();
        }

        let store = RedbStore::open(&path).unwrap();
        assert_eq!(store.get("room:R01").unwrap(), Some(json!({ "id": "R01" })));
    }

    #[test]
    fn test_failed_batch_leaves_nothing_behind() {
        let store = RedbStore::open_in_memory().unwrap();
        store.set("room:R01", &json!({ "status": "occupied" })).unwrap();

        // Dropping an uncommitted transaction aborts it
        {
            let txn = store.db.begin_write().unwrap();
            let mut table = txn.open_table(RECORDS_TABLE).unwrap();
            table.insert("session-history:S1", b"{}".as_slice()).unwrap();
        }

        assert!(store.get("session-history:S1").unwrap().is_none());
        assert_eq!(store.list("session-history:").unwrap().len(), 0);
    }

    #[test]
    fn test_list_stops_at_prefix_boundary() {
        let store = RedbStore::open_in_memory().unwrap();
        store.set("menu:1", &json!(1)).unwrap();
        store.set("menu:2", &json!(2)).unwrap();
        store.set("menuz", &json!(3)).unwrap();
        store.set("room:1", &json!(4)).unwrap();

        let entries = store.list("menu:").unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.key.starts_with("menu:")));
    }
}
