//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the project store chosen at startup, the registry of live wizard
//! sessions, and the preview quiet interval handed to every new session.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use wizard::ProjectStore;

use crate::services::session::SessionRegistry;

/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProjectStore>,
    pub sessions: SessionRegistry,
    pub preview_debounce: Duration,
    pub website_dir: Arc<PathBuf>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn ProjectStore>, preview_debounce: Duration, website_dir: PathBuf) -> Self {
        Self { store, sessions: SessionRegistry::new(), preview_debounce, website_dir: Arc::new(website_dir) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
