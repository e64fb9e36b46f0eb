//! Services - the action handlers, wired to the ports.

mod dual_write;
mod keys;
mod recipes;
mod session;

pub use dual_write::{DualKeyWriter, WriteRetryConfig};
pub use keys::{RECORD_PREFIX, RecordKeys, SAVED_MARKER, SAVED_PREFIX, saved_key};
pub use recipes::RecipeService;
pub use session::{CardSession, Dispatched};
