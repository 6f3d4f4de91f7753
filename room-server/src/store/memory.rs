//! In-process store
//!
//! Nothing survives the process. Used by tests and by terminals configured
//! with `STORE_BACKEND=memory`.

use super::{KvStore, StoreEntry, StoreOp, StoreResult};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn set(&self, key: &str, value: &Value) -> StoreResult<()> {
        self.records.write().insert(key.to_string(), value.clone());
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.records.read().get(key).cloned())
    }

    fn list(&self, prefix: &str) -> StoreResult<Vec<StoreEntry>> {
        let records = self.records.read();
        Ok(records
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| StoreEntry {
                key: key.clone(),
                value: value.clone(),
            })
            .collect())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.records.write().remove(key);
        Ok(())
    }

    /// Applied under one write lock
    fn write_batch(&self, ops: Vec<StoreOp>) -> StoreResult<()> {
        let mut records = self.records.write();
        for op in ops {
            match op {
                StoreOp::Set { key, value } => {
                    records.insert(key, value);
                }
                StoreOp::Remove { key } => {
                    records.remove(&key);
                }
            }
        }
        Ok(())
    }
}
