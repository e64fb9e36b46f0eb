//! Record store implementations - Redis and in-memory fallback.

mod memory;

pub use memory::InMemoryRecordStore;

#[cfg(feature = "redis")]
mod redis_store;

#[cfg(feature = "redis")]
pub use redis_store::{RedisConfig, RedisRecordStore};
