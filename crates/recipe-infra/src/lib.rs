//! # Recipe Infrastructure
//!
//! Concrete implementations of the ports defined in `recipe-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `redis` - Redis-backed record store

pub mod media;
pub mod navigation;
pub mod posting;
pub mod store;

// Re-exports - In-Memory
pub use media::InMemoryMediaUploader;
pub use navigation::RecordingNavigator;
pub use posting::{InMemoryPostPublisher, PublishedPost};
pub use store::InMemoryRecordStore;

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use store::{RedisConfig, RedisRecordStore};
