//! A mounted card: a recipe snapshot, the viewer, and the card state.
//!
//! State changes apply synchronously. Durable effects are spawned and not
//! awaited; nothing re-reads the store to confirm them. Within one session
//! they reach the store in dispatch order.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::card::{CardAction, CardContext, CardLoad, CardState, Effect, FormPrompt, Node, reduce};
use crate::domain::Recipe;
use crate::error::RecipeError;
use crate::ports::Navigator;

use super::recipes::RecipeService;

/// What a dispatched action left for the host.
#[derive(Debug, Default)]
pub struct Dispatched {
    /// A form the host should show.
    pub prompt: Option<FormPrompt>,
    /// Writes still in flight.
    pub pending: Vec<JoinHandle<()>>,
}

pub struct CardSession {
    service: Arc<RecipeService>,
    navigator: Arc<dyn Navigator>,
    post_id: String,
    viewer: Option<String>,
    recipe: Recipe,
    state: CardState,
    /// Resolves when the most recently fired effect has finished.
    tail: Option<oneshot::Receiver<()>>,
}

impl CardSession {
    /// Read the record once and build fresh card state.
    ///
    /// `saved` is seeded from the viewer's stored flag; if that read fails the
    /// card starts unsaved.
    pub async fn mount(
        service: Arc<RecipeService>,
        navigator: Arc<dyn Navigator>,
        post_id: impl Into<String>,
        viewer: Option<String>,
    ) -> Result<Self, RecipeError> {
        let post_id = post_id.into();
        let recipe = service.load_recipe(&post_id).await?;

        let saved = match &viewer {
            Some(user_id) => service
                .is_saved(user_id, &post_id)
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!(post_id = %post_id, error = %e, "Save flag read failed");
                    false
                }),
            None => false,
        };

        let state = CardState::new(&recipe, saved);
        tracing::debug!(post_id = %post_id, viewer = ?viewer, saved, "Card mounted");

        Ok(Self {
            service,
            navigator,
            post_id,
            viewer,
            recipe,
            state,
            tail: None,
        })
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub fn viewer(&self) -> Option<&str> {
        self.viewer.as_deref()
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn state(&self) -> &CardState {
        &self.state
    }

    pub fn render(&self) -> Node {
        CardLoad::Ready {
            recipe: &self.recipe,
            state: &self.state,
            viewer: self.viewer(),
        }
        .render()
    }

    /// Apply `action`, then start its effects.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, action: &CardAction) -> Dispatched {
        let ctx = CardContext {
            recipe: &self.recipe,
            viewer: self.viewer.as_deref(),
        };
        let transition = reduce(&self.state, action, &ctx);
        self.state = transition.state;

        let mut out = Dispatched::default();
        for effect in transition.effects {
            match effect {
                Effect::SetSaveFlag => {
                    if let Some(user_id) = self.viewer.clone() {
                        let (service, post_id) = (self.service.clone(), self.post_id.clone());
                        out.pending.push(self.fire("save flag write", async move {
                            service.set_saved(&user_id, &post_id).await
                        }));
                    }
                }
                Effect::ClearSaveFlag => {
                    if let Some(user_id) = self.viewer.clone() {
                        let (service, post_id) = (self.service.clone(), self.post_id.clone());
                        out.pending.push(self.fire("save flag clear", async move {
                            service.clear_saved(&user_id, &post_id).await
                        }));
                    }
                }
                Effect::SubmitComment(text) => {
                    let (service, post_id) = (self.service.clone(), self.post_id.clone());
                    out.pending.push(self.fire("tracking comment", async move {
                        service.comment(&post_id, &text).await
                    }));
                }
                Effect::Navigate(url) => self.navigator.navigate_to(&url),
                Effect::ShowForm(prompt) => out.prompt = Some(prompt),
            }
        }
        out
    }

    /// Spawn `fut` behind every effect fired before it.
    fn fire<F>(&mut self, what: &'static str, fut: F) -> JoinHandle<()>
    where
        F: Future<Output = Result<(), RecipeError>> + Send + 'static,
    {
        let post_id = self.post_id.clone();
        let previous = self.tail.take();
        let (done, tail) = oneshot::channel();
        self.tail = Some(tail);

        tokio::spawn(async move {
            if let Some(previous) = previous {
                // A dropped sender means the previous effect ended early; go on
                let _ = previous.await;
            }
            if let Err(e) = fut.await {
                tracing::warn!(post_id = %post_id, error = %e, "{} failed", what);
            }
            let _ = done.send(());
        })
    }
}
