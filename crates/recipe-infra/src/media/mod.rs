//! Media upload implementations.

mod memory;

pub use memory::InMemoryMediaUploader;
