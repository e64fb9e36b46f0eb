//! Writes one record to both of its keys, all or nothing.
//!
//! Each copy is retried on failure. When a copy cannot be written, every copy
//! already changed is restored from the snapshot taken before the write.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error::RecipeError;
use crate::ports::{FieldMap, RecordStore, StoreError};

use super::keys::RecordKeys;

/// Retry policy for record writes.
#[derive(Debug, Clone)]
pub struct WriteRetryConfig {
    /// Attempts per key, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt; grows linearly after that.
    pub backoff: Duration,
}

impl Default for WriteRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(50),
        }
    }
}

impl WriteRetryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            max_attempts: std::env::var("RECORD_WRITE_MAX_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(3),
            backoff: Duration::from_millis(
                std::env::var("RECORD_WRITE_BACKOFF_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(50),
            ),
        }
    }
}

pub struct DualKeyWriter {
    store: Arc<dyn RecordStore>,
    config: WriteRetryConfig,
}

impl DualKeyWriter {
    pub fn new(store: Arc<dyn RecordStore>, config: WriteRetryConfig) -> Self {
        Self { store, config }
    }

    /// Merge `fields` into both copies of the record for `post_id`.
    pub async fn write(&self, post_id: &str, fields: &FieldMap) -> Result<(), RecipeError> {
        let keys = RecordKeys::for_post(post_id);

        let mut snapshots = Vec::with_capacity(2);
        for key in keys.both() {
            snapshots.push((key, self.snapshot(key).await?));
        }

        let mut applied: Vec<(&str, Option<FieldMap>)> = Vec::with_capacity(2);
        for (key, snapshot) in snapshots {
            let result = self
                .with_retry(key, || self.store.write_fields(key, fields))
                .await;

            if let Err(err) = result {
                tracing::warn!(
                    post_id = %post_id,
                    key = %key,
                    error = %err,
                    "Record write failed, rolling back"
                );
                self.roll_back(post_id, fields, &applied).await?;
                return Err(err.into());
            }
            applied.push((key, snapshot));
        }

        tracing::debug!(post_id = %post_id, fields = fields.len(), "Record written to both keys");
        Ok(())
    }

    async fn snapshot(&self, key: &str) -> Result<Option<FieldMap>, StoreError> {
        match self.store.read_all(key).await {
            Ok(map) => Ok(Some(map)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn roll_back(
        &self,
        post_id: &str,
        fields: &FieldMap,
        applied: &[(&str, Option<FieldMap>)],
    ) -> Result<(), RecipeError> {
        for (key, snapshot) in applied {
            let restored = self
                .with_retry(key, || self.restore(key, fields, snapshot.as_ref()))
                .await;

            if let Err(err) = restored {
                tracing::error!(
                    post_id = %post_id,
                    key = %key,
                    error = %err,
                    "Record copies diverged, rollback failed"
                );
                return Err(RecipeError::Diverged {
                    post_id: post_id.to_string(),
                    reason: err.to_string(),
                });
            }
        }
        Ok(())
    }

    async fn restore(
        &self,
        key: &str,
        written: &FieldMap,
        snapshot: Option<&FieldMap>,
    ) -> Result<(), StoreError> {
        let Some(previous) = snapshot else {
            return self.store.remove(key).await;
        };
        for field in written.keys().filter(|f| !previous.contains_key(*f)) {
            self.store.delete_field(key, field).await?;
        }
        self.store.write_fields(key, previous).await
    }

    async fn with_retry<F, Fut>(&self, key: &str, mut op: F) -> Result<(), StoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), StoreError>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(()) => return Ok(()),
                Err(err) if attempt < self.config.max_attempts => {
                    tracing::debug!(key = %key, attempt, error = %err, "Store operation failed, retrying");
                    tokio::time::sleep(self.config.backoff * attempt).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    /// Store double whose writes to chosen keys fail a set number of times.
    #[derive(Default)]
    struct FlakyStore {
        data: Mutex<HashMap<String, FieldMap>>,
        write_failures: Mutex<HashMap<String, usize>>,
        broken_removes: HashSet<String>,
    }

    impl FlakyStore {
        fn fail_writes(self, key: &str, times: usize) -> Self {
            self.write_failures
                .lock()
                .unwrap()
                .insert(key.to_string(), times);
            self
        }

        fn break_removes(mut self, key: &str) -> Self {
            self.broken_removes.insert(key.to_string());
            self
        }

        fn seed(self, key: &str, map: FieldMap) -> Self {
            self.data.lock().unwrap().insert(key.to_string(), map);
            self
        }

        fn get(&self, key: &str) -> Option<FieldMap> {
            self.data.lock().unwrap().get(key).cloned()
        }
    }

    #[async_trait]
    impl RecordStore for FlakyStore {
        async fn read_all(&self, key: &str) -> Result<FieldMap, StoreError> {
            self.get(key).ok_or_else(|| StoreError::NotFound(key.to_string()))
        }

        async fn read_field(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
            Ok(self.get(key).and_then(|m| m.get(field).cloned()))
        }

        async fn write_fields(&self, key: &str, fields: &FieldMap) -> Result<(), StoreError> {
            if let Some(left) = self.write_failures.lock().unwrap().get_mut(key) {
                if *left > 0 {
                    *left -= 1;
                    return Err(StoreError::Operation(format!("write to {key} refused")));
                }
            }
            let mut data = self.data.lock().unwrap();
            data.entry(key.to_string())
                .or_default()
                .extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
            Ok(())
        }

        async fn delete_field(&self, key: &str, field: &str) -> Result<(), StoreError> {
            if let Some(map) = self.data.lock().unwrap().get_mut(key) {
                map.remove(field);
            }
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), StoreError> {
            if self.broken_removes.contains(key) {
                return Err(StoreError::Connection("remove refused".into()));
            }
            self.data.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn map(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn writer(store: Arc<FlakyStore>) -> DualKeyWriter {
        DualKeyWriter::new(
            store,
            WriteRetryConfig {
                max_attempts: 3,
                backoff: Duration::from_millis(1),
            },
        )
    }

    #[tokio::test]
    async fn test_writes_identical_copies() {
        let store = Arc::new(FlakyStore::default());
        let fields = map(&[("title", "Soup"), ("ingredients", "Water\nSalt")]);

        writer(store.clone()).write("t3_a", &fields).await.unwrap();

        assert_eq!(store.get("t3_a"), Some(fields.clone()));
        assert_eq!(store.get("recipe:t3_a"), Some(fields));
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() {
        let store = Arc::new(FlakyStore::default().fail_writes("recipe:t3_a", 2));
        let fields = map(&[("title", "Soup")]);

        writer(store.clone()).write("t3_a", &fields).await.unwrap();

        assert_eq!(store.get("t3_a"), store.get("recipe:t3_a"));
    }

    #[tokio::test]
    async fn test_persistent_failure_restores_previous_copy() {
        let before = map(&[("title", "Soup"), ("pictureUrl", "https://media/a.png")]);
        let store = Arc::new(
            FlakyStore::default()
                .seed("t3_a", before.clone())
                .seed("recipe:t3_a", before.clone())
                .fail_writes("recipe:t3_a", 10),
        );
        let update = map(&[("title", "Stew"), ("intro", "new field")]);

        let err = writer(store.clone()).write("t3_a", &update).await.unwrap_err();

        assert!(matches!(err, RecipeError::Store(_)));
        assert_eq!(store.get("t3_a"), Some(before.clone()));
        assert_eq!(store.get("recipe:t3_a"), Some(before));
    }

    #[tokio::test]
    async fn test_failed_create_leaves_no_copy() {
        let store = Arc::new(FlakyStore::default().fail_writes("recipe:t3_a", 10));

        let result = writer(store.clone())
            .write("t3_a", &map(&[("title", "Soup")]))
            .await;

        assert!(result.is_err());
        assert_eq!(store.get("t3_a"), None);
        assert_eq!(store.get("recipe:t3_a"), None);
    }

    #[tokio::test]
    async fn test_failed_rollback_reports_divergence() {
        let store = Arc::new(
            FlakyStore::default()
                .fail_writes("recipe:t3_a", 10)
                .break_removes("t3_a"),
        );

        let err = writer(store.clone())
            .write("t3_a", &map(&[("title", "Soup")]))
            .await
            .unwrap_err();

        assert!(matches!(err, RecipeError::Diverged { .. }));
        assert!(store.get("t3_a").is_some());
    }
}
