//! Domain-level error types.

use thiserror::Error;

use crate::ports::{MediaError, PostingError, StoreError};

/// Recipe errors - failures of the create/edit/load actions.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Recipe not found for post {post_id}")]
    NotFound { post_id: String },

    #[error("Only the recipe author may edit post {post_id}")]
    Forbidden { post_id: String },

    #[error("Picture upload failed: {0}")]
    Upload(#[from] MediaError),

    #[error("Post submission failed: {0}")]
    Posting(#[from] PostingError),

    #[error("Record store failure: {0}")]
    Store(#[from] StoreError),

    #[error("Record copies for post {post_id} diverged: {reason}")]
    Diverged { post_id: String, reason: String },
}
