//! Navigation collaborator that records requested URLs for the host to drain.

use std::sync::Mutex;

use recipe_core::ports::Navigator;

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    requested: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every URL requested since the last call.
    pub fn take(&self) -> Vec<String> {
        let mut requested = self.requested.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *requested)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, url: &str) {
        tracing::debug!(url = %url, "Navigation requested");
        self.requested
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.to_string());
    }
}
