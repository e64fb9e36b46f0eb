//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod media;
mod navigation;
mod posting;
mod record_store;

pub use media::{MediaError, MediaUploader};
pub use navigation::Navigator;
pub use posting::{PostPublisher, PostingError, SubmitPost};
pub use record_store::{FieldMap, RecordStore, StoreError};
