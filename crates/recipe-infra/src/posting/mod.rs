//! Post and comment submission implementations.

mod memory;

pub use memory::{InMemoryPostPublisher, PublishedPost};
