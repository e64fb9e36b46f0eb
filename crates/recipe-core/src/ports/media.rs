use async_trait::async_trait;

/// Picture upload collaborator.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Upload the image at `source_url` and return a stable media URL.
    async fn upload(&self, source_url: &str) -> Result<String, MediaError>;
}

/// Media upload errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MediaError {
    #[error("Upload rejected: {0}")]
    Rejected(String),

    #[error("Media service unavailable: {0}")]
    Unavailable(String),
}
