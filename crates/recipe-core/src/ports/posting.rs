//! Posting port - the host platform's post and comment submission.

use async_trait::async_trait;

use crate::card::Node;

/// Outer post submission request.
#[derive(Debug, Clone)]
pub struct SubmitPost {
    pub title: String,
    pub container: String,
    /// Shown by the host until the card mounts.
    pub preview: Node,
}

#[async_trait]
pub trait PostPublisher: Send + Sync {
    /// Name of the community the current request runs in.
    async fn current_container(&self) -> Result<String, PostingError>;

    /// Submit the outer post and return its identifier.
    async fn submit_post(&self, post: SubmitPost) -> Result<String, PostingError>;

    /// Submit a plain-text comment on a post.
    async fn submit_comment(&self, post_id: &str, text: &str) -> Result<(), PostingError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PostingError {
    #[error("Unknown post: {0}")]
    UnknownPost(String),

    #[error("Submission rejected: {0}")]
    Rejected(String),

    #[error("Connection error: {0}")]
    Connection(String),
}
