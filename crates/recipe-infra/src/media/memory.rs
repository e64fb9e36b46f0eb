//! In-memory media uploader.
//!
//! Accepts any http(s) source and hands out a stable URL under a base address.
//! Nothing is fetched; the mapping is lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use url::Url;
use uuid::Uuid;

use recipe_core::ports::{MediaError, MediaUploader};

pub struct InMemoryMediaUploader {
    base_url: String,
    /// media URL -> source URL
    uploads: RwLock<HashMap<String, String>>,
}

impl InMemoryMediaUploader {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            uploads: RwLock::new(HashMap::new()),
        }
    }

    /// Source a media URL was uploaded from.
    pub async fn source_of(&self, media_url: &str) -> Option<String> {
        self.uploads.read().await.get(media_url).cloned()
    }

    pub async fn upload_count(&self) -> usize {
        self.uploads.read().await.len()
    }
}

impl Default for InMemoryMediaUploader {
    fn default() -> Self {
        Self::new("https://media.localhost/uploads")
    }
}

fn extension(source: &Url) -> &str {
    source
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.len() <= 5)
        .unwrap_or("png")
}

#[async_trait]
impl MediaUploader for InMemoryMediaUploader {
    async fn upload(&self, source_url: &str) -> Result<String, MediaError> {
        let source = Url::parse(source_url.trim())
            .map_err(|e| MediaError::Rejected(format!("{source_url}: {e}")))?;
        if !matches!(source.scheme(), "http" | "https") {
            return Err(MediaError::Rejected(format!(
                "unsupported scheme {}",
                source.scheme()
            )));
        }

        let media_url = format!(
            "{}/{}.{}",
            self.base_url,
            Uuid::new_v4().simple(),
            extension(&source)
        );
        self.uploads
            .write()
            .await
            .insert(media_url.clone(), source.to_string());

        tracing::debug!(source = %source, media_url = %media_url, "Picture uploaded");
        Ok(media_url)
    }
}
