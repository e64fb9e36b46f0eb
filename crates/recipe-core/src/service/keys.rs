//! Record store key layout.

/// Prefix of the second copy of each recipe record.
pub const RECORD_PREFIX: &str = "recipe:";

/// Prefix of the per-user saved-posts hash.
pub const SAVED_PREFIX: &str = "saved:";

/// Value stored for a saved post.
pub const SAVED_MARKER: &str = "true";

/// The two keys holding copies of one recipe record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKeys {
    /// The bare post id; reads go here first.
    pub raw: String,
    pub prefixed: String,
}

impl RecordKeys {
    pub fn for_post(post_id: &str) -> Self {
        Self {
            raw: post_id.to_string(),
            prefixed: format!("{RECORD_PREFIX}{post_id}"),
        }
    }

    /// Both keys, in write order.
    pub fn both(&self) -> [&str; 2] {
        [&self.raw, &self.prefixed]
    }
}

pub fn saved_key(user_id: &str) -> String {
    format!("{SAVED_PREFIX}{user_id}")
}
