use std::collections::BTreeMap;

use async_trait::async_trait;

/// A flat, string-valued record. Ordered so two copies compare field by field.
pub type FieldMap = BTreeMap<String, String>;

/// Record store trait - abstraction over hash-per-key backends (Redis, in-memory).
///
/// No operation spans more than one key.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read every field under `key`. A missing or empty hash is `NotFound`.
    async fn read_all(&self, key: &str) -> Result<FieldMap, StoreError>;

    /// Read one field under `key`.
    async fn read_field(&self, key: &str, field: &str) -> Result<Option<String>, StoreError>;

    /// Merge `fields` into `key`. Fields not named are left unchanged.
    async fn write_fields(&self, key: &str, fields: &FieldMap) -> Result<(), StoreError>;

    /// Delete one field. Succeeds when the field is already absent.
    async fn delete_field(&self, key: &str, field: &str) -> Result<(), StoreError>;

    /// Drop the whole key. Succeeds when the key is already absent.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Record store errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Key not found: {0}")]
    NotFound(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
