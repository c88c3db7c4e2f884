//! Live wizard session registry.
//!
//! DESIGN
//! ======
//! Each editor websocket opens one [`WizardSession`] and registers it here
//! under its id. A preview websocket looks the session up by id and attaches
//! its surface to the session's preview slot. The editor connection removes
//! the entry when it closes; removal also closes the session so any pending
//! preview flush is dropped.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;
use wizard::{PreviewSlot, ProjectStore, WizardSession};

#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<WizardSession>>>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a fresh session and register it.
    pub async fn open(&self, store: Arc<dyn ProjectStore>, quiet_interval: Duration) -> Arc<WizardSession> {
        let session = Arc::new(WizardSession::new(store, PreviewSlot::new(), quiet_interval));
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id(), Arc::clone(&session));
        info!(session_id = %session.id(), live = sessions.len(), "wizard session opened");
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<WizardSession>> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Close and unregister a session. Returns `false` if it was unknown.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id);
        let Some(session) = removed else {
            return false;
        };
        session.close();
        session.preview_slot().detach();
        info!(session_id = %id, "wizard session closed");
        true
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
