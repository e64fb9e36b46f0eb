//! Application state - shared across all handlers.

use std::sync::Arc;

use recipe_core::ports::{RecordStore, StoreError};
use recipe_core::service::RecipeService;
use recipe_infra::{InMemoryMediaUploader, InMemoryPostPublisher, InMemoryRecordStore};

use crate::config::AppConfig;
use crate::sessions::SessionRegistry;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub recipes: Arc<RecipeService>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, StoreError> {
        let store = build_store(config).await?;
        let state = Self::with_store(config, store);
        tracing::info!(community = %config.community, "Application state initialized");
        Ok(state)
    }

    /// State over an explicit store; media and posting stay in-process.
    pub fn with_store(config: &AppConfig, store: Arc<dyn RecordStore>) -> Self {
        let media = Arc::new(InMemoryMediaUploader::new(config.media_base_url.clone()));
        let posts = Arc::new(InMemoryPostPublisher::new(config.community.clone()));

        Self {
            recipes: Arc::new(RecipeService::new(
                store,
                media,
                posts,
                config.write_retry.clone(),
            )),
            sessions: Arc::new(SessionRegistry::new(config.card_idle_timeout)),
        }
    }
}

#[cfg(feature = "redis")]
async fn build_store(config: &AppConfig) -> Result<Arc<dyn RecordStore>, StoreError> {
    use recipe_infra::RedisRecordStore;

    let Some(redis) = &config.redis else {
        tracing::warn!("REDIS_URL not set. Running with in-memory record store.");
        return Ok(Arc::new(InMemoryRecordStore::new()));
    };

    match RedisRecordStore::new(redis).await {
        Ok(store) => Ok(Arc::new(store)),
        Err(e) if redis.fallback_to_memory => {
            tracing::error!(
                "Failed to connect to Redis: {}. Using in-memory fallback.",
                e
            );
            Ok(Arc::new(InMemoryRecordStore::new()))
        }
        Err(e) => Err(e),
    }
}

#[cfg(not(feature = "redis"))]
async fn build_store(_config: &AppConfig) -> Result<Arc<dyn RecordStore>, StoreError> {
    tracing::info!("Running without redis feature - using in-memory record store");
    Ok(Arc::new(InMemoryRecordStore::new()))
}
