//! Key-value persistence
//!
//! The core depends only on the [`KvStore`] trait. Records are JSON values
//! under prefixed keys:
//!
//! | Prefix | Value |
//! |--------|-------|
//! | `room:<roomId>` | `Room` (with the live session nested) |
//! | `session-history:<sessionId>` | `SessionRecord` |
//! | `menu:<itemId>` | `MenuItem` |
//! | `current-user` | `User` |
//!
//! The backend is picked once at the composition root (see
//! [`crate::core::Config::open_store`]).

mod error;
mod memory;
mod redb_store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub mod keys {
    pub const ROOM_PREFIX: &str = "room:";
    pub const SESSION_HISTORY_PREFIX: &str = "session-history:";
    pub const MENU_PREFIX: &str = "menu:";
    pub const CURRENT_USER: &str = "current-user";

    pub fn room(room_id: &str) -> String {
        format!("{ROOM_PREFIX}{room_id}")
    }

    pub fn session_history(session_id: &str) -> String {
        format!("{SESSION_HISTORY_PREFIX}{session_id}")
    }

    pub fn menu(item_id: &str) -> String {
        format!("{MENU_PREFIX}{item_id}")
    }
}

/// A `{key, value}` pair returned by [`KvStore::list`]
#[derive(Debug, Clone, PartialEq)]
pub struct StoreEntry {
    pub key: String,
    pub value: Value,
}

/// One write inside [`KvStore::write_batch`]
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOp {
    Set { key: String, value: Value },
    Remove { key: String },
}

impl StoreOp {
    pub fn set<T: Serialize>(key: impl Into<String>, record: &T) -> StoreResult<Self> {
        Ok(StoreOp::Set {
            key: key.into(),
            value: serde_json::to_value(record)?,
        })
    }
}

/// Prefix-listable JSON key-value store
pub trait KvStore: Send + Sync {
    /// Upsert `value` under the exact `key`
    fn set(&self, key: &str, value: &Value) -> StoreResult<()>;

    fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// All entries whose key starts with `prefix`, in key order
    fn list(&self, prefix: &str) -> StoreResult<Vec<StoreEntry>>;

    /// Delete `key`; succeeds when the key does not exist
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Apply several writes. Backends with transactions apply them
    /// atomically; the default applies them one by one, in order.
    fn write_batch(&self, ops: Vec<StoreOp>) -> StoreResult<()> {
        for op in ops {
            match op {
                StoreOp::Set { key, value } => self.set(&key, &value)?,
                StoreOp::Remove { key } => self.remove(&key)?,
            }
        }
        Ok(())
    }
}

/// Serialize `record` and store it under `key`
pub fn put_record<T: Serialize>(store: &dyn KvStore, key: &str, record: &T) -> StoreResult<()> {
    let value = serde_json::to_value(record)?;
    store.set(key, &value)
}

/// Fetch and deserialize one record
pub fn get_record<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> StoreResult<Option<T>> {
    match store.get(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Load every record under `prefix`
///
/// Entries that no longer deserialize are skipped with a warning instead of
/// failing the whole load.
pub fn list_records<T: DeserializeOwned>(store: &dyn KvStore, prefix: &str) -> StoreResult<Vec<T>> {
    let entries = store.list(prefix)?;
    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        match serde_json::from_value(entry.value) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(key = %entry.key, error = %e, "Skipping unreadable record");
            }
        }
    }
    Ok(records)
}

/// Load every record under `prefix`, failing on the first unreadable one
pub fn list_records_strict<T: DeserializeOwned>(
    store: &dyn KvStore,
    prefix: &str,
) -> StoreResult<Vec<T>> {
    store
        .list(prefix)?
        .into_iter()
        .map(|entry| {
            serde_json::from_value(entry.value).map_err(|e| {
                tracing::error!(key = %entry.key, error = %e, "Unreadable record");
                StoreError::from(e)
            })
        })
        .collect()
}
