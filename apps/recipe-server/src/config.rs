//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use recipe_core::service::WriteRetryConfig;

#[cfg(feature = "redis")]
use recipe_infra::RedisConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Community new recipe posts are submitted to.
    pub community: String,
    /// Base address of uploaded pictures.
    pub media_base_url: String,
    pub write_retry: WriteRetryConfig,
    /// Card sessions idle for longer are dropped.
    pub card_idle_timeout: Duration,
    /// Present only when `REDIS_URL` is set.
    #[cfg(feature = "redis")]
    pub redis: Option<RedisConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            community: env::var("COMMUNITY_NAME").unwrap_or_else(|_| "recipes".to_string()),
            media_base_url: env::var("MEDIA_BASE_URL")
                .unwrap_or_else(|_| "https://media.localhost/uploads".to_string()),
            write_retry: WriteRetryConfig::from_env(),
            card_idle_timeout: Duration::from_secs(
                env::var("CARD_SESSION_IDLE_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1800),
            ),
            #[cfg(feature = "redis")]
            redis: env::var("REDIS_URL").ok().map(|_| RedisConfig::from_env()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            community: "recipes".to_string(),
            media_base_url: "https://media.localhost/uploads".to_string(),
            write_retry: WriteRetryConfig::default(),
            card_idle_timeout: Duration::from_secs(1800),
            #[cfg(feature = "redis")]
            redis: None,
        }
    }
}
