//! In-memory record store - used as fallback when Redis is unavailable.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use recipe_core::ports::{FieldMap, RecordStore, StoreError};

/// In-memory store of one field-map per key, behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryRecordStore {
    store: RwLock<HashMap<String, FieldMap>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Number of keys currently held.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn read_all(&self, key: &str) -> Result<FieldMap, StoreError> {
        let store = self.store.read().await;
        store
            .get(key)
            .filter(|fields| !fields.is_empty())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn read_field(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        let store = self.store.read().await;
        Ok(store.get(key).and_then(|fields| fields.get(field)).cloned())
    }

    async fn write_fields(&self, key: &str, fields: &FieldMap) -> Result<(), StoreError> {
        let mut store = self.store.write().await;
        let entry = store.entry(key.to_string()).or_default();
        for (name, value) in fields {
            entry.insert(name.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete_field(&self, key: &str, field: &str) -> Result<(), StoreError> {
        let mut store = self.store.write().await;
        if let Some(fields) = store.get_mut(key) {
            fields.remove(field);
            // An emptied hash disappears, as in Redis
            if fields.is_empty() {
                store.remove(key);
            }
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut store = self.store.write().await;
        store.remove(key);
        Ok(())
    }
}
