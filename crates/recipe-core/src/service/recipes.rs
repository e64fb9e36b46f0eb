//! Recipe service - create, edit and load recipes, and keep save flags.

use std::sync::Arc;

use crate::card::loading_preview;
use crate::domain::{Recipe, RecipeDraft, RecipeEdit, transcript};
use crate::error::RecipeError;
use crate::ports::{
    FieldMap, MediaUploader, PostPublisher, RecordStore, StoreError, SubmitPost,
};

use super::dual_write::{DualKeyWriter, WriteRetryConfig};
use super::keys::{RecordKeys, SAVED_MARKER, saved_key};

pub struct RecipeService {
    store: Arc<dyn RecordStore>,
    media: Arc<dyn MediaUploader>,
    posts: Arc<dyn PostPublisher>,
    writer: DualKeyWriter,
}

impl RecipeService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        media: Arc<dyn MediaUploader>,
        posts: Arc<dyn PostPublisher>,
        retry: WriteRetryConfig,
    ) -> Self {
        Self {
            writer: DualKeyWriter::new(store.clone(), retry),
            store,
            media,
            posts,
        }
    }

    /// Publish a new recipe post and return its id.
    ///
    /// The picture is uploaded first; if that fails nothing is submitted or stored.
    pub async fn create_recipe(
        &self,
        author: &str,
        draft: RecipeDraft,
    ) -> Result<String, RecipeError> {
        let picture_url = self.media.upload(&draft.picture).await?;
        let container = self.posts.current_container().await?;

        let recipe = draft.into_recipe(picture_url, author.to_string());
        let post_id = self
            .posts
            .submit_post(SubmitPost {
                title: recipe.title.clone(),
                container: container.clone(),
                preview: loading_preview(),
            })
            .await?;

        self.writer.write(&post_id, &recipe.to_fields()).await?;

        if let Err(e) = self
            .posts
            .submit_comment(&post_id, &transcript(&recipe))
            .await
        {
            tracing::warn!(post_id = %post_id, error = %e, "Transcript comment failed");
        }

        tracing::info!(post_id = %post_id, container = %container, author = %author, "Recipe created");
        Ok(post_id)
    }

    /// Replace the editable fields of a recipe. Only its author may do this.
    ///
    /// Returns the record as stored after the edit.
    pub async fn update_recipe(
        &self,
        editor: &str,
        post_id: &str,
        edit: RecipeEdit,
    ) -> Result<Recipe, RecipeError> {
        let current = self.load_recipe(post_id).await?;
        if !current.is_author(Some(editor)) {
            return Err(RecipeError::Forbidden {
                post_id: post_id.to_string(),
            });
        }

        let picture_url = match edit.new_picture() {
            Some(source) => Some(self.media.upload(source).await?),
            None => None,
        };

        let update = edit.into_update(picture_url);
        self.writer.write(post_id, &update.to_fields()).await?;

        tracing::info!(
            post_id = %post_id,
            new_picture = update.picture_url.is_some(),
            "Recipe updated"
        );
        Ok(update.apply_to(&current))
    }

    /// Read a recipe, preferring the raw key.
    pub async fn load_recipe(&self, post_id: &str) -> Result<Recipe, RecipeError> {
        let keys = RecordKeys::for_post(post_id);
        let map = match self.read_record(&keys.raw).await? {
            Some(map) => map,
            None => {
                tracing::debug!(post_id = %post_id, "Raw key missing, trying prefixed copy");
                self.read_record(&keys.prefixed)
                    .await?
                    .ok_or_else(|| RecipeError::NotFound {
                        post_id: post_id.to_string(),
                    })?
            }
        };
        Ok(Recipe::from_fields(&map))
    }

    async fn read_record(&self, key: &str) -> Result<Option<FieldMap>, StoreError> {
        match self.store.read_all(key).await {
            Ok(map) if !map.is_empty() => Ok(Some(map)),
            Ok(_) | Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn is_saved(&self, user_id: &str, post_id: &str) -> Result<bool, RecipeError> {
        let flag = self.store.read_field(&saved_key(user_id), post_id).await?;
        Ok(flag.is_some())
    }

    pub async fn set_saved(&self, user_id: &str, post_id: &str) -> Result<(), RecipeError> {
        let mut fields = FieldMap::new();
        fields.insert(post_id.to_string(), SAVED_MARKER.to_string());
        self.store.write_fields(&saved_key(user_id), &fields).await?;
        tracing::debug!(user_id = %user_id, post_id = %post_id, "Save flag set");
        Ok(())
    }

    pub async fn clear_saved(&self, user_id: &str, post_id: &str) -> Result<(), RecipeError> {
        self.store.delete_field(&saved_key(user_id), post_id).await?;
        tracing::debug!(user_id = %user_id, post_id = %post_id, "Save flag cleared");
        Ok(())
    }

    pub async fn comment(&self, post_id: &str, text: &str) -> Result<(), RecipeError> {
        self.posts.submit_comment(post_id, text).await?;
        Ok(())
    }
}
