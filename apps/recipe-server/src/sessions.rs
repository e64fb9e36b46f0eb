//! Mounted card sessions, keyed by session id.
//!
//! A session lives from mount until the client ends it or it sits idle past
//! the configured limit; nothing is persisted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use uuid::Uuid;

use recipe_core::service::CardSession;
use recipe_infra::RecordingNavigator;

pub struct SessionSlot {
    pub card: CardSession,
    /// Collects navigation requests until the response drains them.
    pub navigator: Arc<RecordingNavigator>,
}

struct Entry {
    slot: SessionSlot,
    last_touched: Instant,
}

pub struct SessionRegistry {
    idle_limit: Duration,
    sessions: Mutex<HashMap<Uuid, Entry>>,
}

impl SessionRegistry {
    /// Sessions untouched for longer than `idle_limit` are evicted.
    pub fn new(idle_limit: Duration) -> Self {
        Self {
            idle_limit,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, slot: SessionSlot) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.lock().await;
        Self::sweep(&mut sessions, self.idle_limit);
        sessions.insert(
            id,
            Entry {
                slot,
                last_touched: Instant::now(),
            },
        );
        tracing::debug!(session_id = %id, open = sessions.len(), "Card session opened");
        id
    }

    /// Run `f` on a session while holding the registry lock. Counts as activity.
    pub async fn with<R>(&self, id: Uuid, f: impl FnOnce(&mut SessionSlot) -> R) -> Option<R> {
        let mut sessions = self.sessions.lock().await;
        let entry = sessions.get_mut(&id)?;
        if entry.last_touched.elapsed() > self.idle_limit {
            sessions.remove(&id);
            tracing::debug!(session_id = %id, "Card session expired");
            return None;
        }
        entry.last_touched = Instant::now();
        Some(f(&mut entry.slot))
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.lock().await.remove(&id).is_some();
        if removed {
            tracing::debug!(session_id = %id, "Card session ended");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Drop idle sessions and return how many went.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        Self::sweep(&mut sessions, self.idle_limit)
    }

    fn sweep(sessions: &mut HashMap<Uuid, Entry>, idle_limit: Duration) -> usize {
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_touched.elapsed() <= idle_limit);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, open = sessions.len(), "Idle card sessions evicted");
        }
        evicted
    }
}

/// Periodically evict idle sessions until the registry is dropped.
pub fn spawn_idle_sweeper(registry: &Arc<SessionRegistry>, every: Duration) {
    let registry = Arc::downgrade(registry);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let Some(registry) = registry.upgrade() else {
                break;
            };
            registry.evict_idle().await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use recipe_core::domain::RecipeDraft;
    use recipe_infra::InMemoryRecordStore;

    use crate::config::AppConfig;
    use crate::state::AppState;

    async fn slot(state: &AppState) -> SessionSlot {
        let draft = RecipeDraft {
            title: "Soup".into(),
            picture: "http://x/y.png".into(),
            intro: None,
            ingredients: "Water".into(),
            instructions: None,
            link: None,
        };
        let post_id = state.recipes.create_recipe("t2_cook", draft).await.unwrap();
        let navigator = Arc::new(RecordingNavigator::new());
        let card = CardSession::mount(state.recipes.clone(), navigator.clone(), post_id, None)
            .await
            .unwrap();
        SessionSlot { card, navigator }
    }

    fn state() -> AppState {
        AppState::with_store(&AppConfig::default(), Arc::new(InMemoryRecordStore::new()))
    }

    #[tokio::test]
    async fn test_idle_session_is_evicted() {
        let state = state();
        let registry = SessionRegistry::new(Duration::from_millis(20));
        let idle = registry.insert(slot(&state).await).await;

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(registry.with(idle, |_| ()).await.is_none());
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn test_sweep_keeps_active_sessions() {
        let state = state();
        let registry = SessionRegistry::new(Duration::from_millis(50));
        let stale = registry.insert(slot(&state).await).await;
        tokio::time::sleep(Duration::from_millis(80)).await;

        let fresh = registry.insert(slot(&state).await).await;
        assert_eq!(registry.len().await, 1);
        assert!(registry.with(stale, |_| ()).await.is_none());
        assert!(registry.with(fresh, |_| ()).await.is_some());
        assert_eq!(registry.evict_idle().await, 0);
    }
}
