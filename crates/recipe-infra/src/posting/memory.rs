//! In-memory post publisher.
//!
//! Keeps submitted posts and their comments in process memory.
//! Works within a single process only.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use recipe_core::card::Node;
use recipe_core::ports::{PostPublisher, PostingError, SubmitPost};

/// A post as the publisher received it.
#[derive(Debug, Clone)]
pub struct PublishedPost {
    pub id: String,
    pub title: String,
    pub container: String,
    pub preview: Node,
    /// Comments in submission order.
    pub comments: Vec<String>,
}

pub struct InMemoryPostPublisher {
    container: String,
    posts: RwLock<HashMap<String, PublishedPost>>,
}

impl InMemoryPostPublisher {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            posts: RwLock::new(HashMap::new()),
        }
    }

    pub async fn post(&self, post_id: &str) -> Option<PublishedPost> {
        self.posts.read().await.get(post_id).cloned()
    }

    pub async fn comments(&self, post_id: &str) -> Vec<String> {
        self.posts
            .read()
            .await
            .get(post_id)
            .map(|post| post.comments.clone())
            .unwrap_or_default()
    }
}

impl Default for InMemoryPostPublisher {
    fn default() -> Self {
        Self::new("recipes")
    }
}

#[async_trait]
impl PostPublisher for InMemoryPostPublisher {
    async fn current_container(&self) -> Result<String, PostingError> {
        Ok(self.container.clone())
    }

    async fn submit_post(&self, post: SubmitPost) -> Result<String, PostingError> {
        if post.title.trim().is_empty() {
            return Err(PostingError::Rejected("title is empty".to_string()));
        }

        let mut posts = self.posts.write().await;
        let id = loop {
            let candidate = format!("t3_{}", Uuid::new_v4().simple());
            if !posts.contains_key(&candidate) {
                break candidate;
            }
        };

        tracing::info!(post_id = %id, container = %post.container, "Post submitted");
        posts.insert(
            id.clone(),
            PublishedPost {
                id: id.clone(),
                title: post.title,
                container: post.container,
                preview: post.preview,
                comments: Vec::new(),
            },
        );
        Ok(id)
    }

    async fn submit_comment(&self, post_id: &str, text: &str) -> Result<(), PostingError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .get_mut(post_id)
            .ok_or_else(|| PostingError::UnknownPost(post_id.to_string()))?;
        post.comments.push(text.to_string());
        tracing::debug!(post_id = %post_id, "Comment submitted");
        Ok(())
    }
}
