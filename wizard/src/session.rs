//! Wizard session: one operator building one project.
//!
//! DESIGN
//! ======
//! The session glues three pieces together: the [`WizardState`] machine
//! behind a mutex, the [`PreviewSync`] channel that reads that mutex when it
//! fires, and the injected [`ProjectStore`]. Every command that actually
//! changed state re-arms the preview flush. Locks are never held across an
//! await.
//!
//! LIFECYCLE
//! =========
//! 1. `new` → default configuration, step 0, no surface attached
//! 2. Edits and navigation → state mutates, preview flush re-armed
//! 3. `save` succeeds → pending flush cancelled, session finished
//! 4. `close` or drop → pending flush cancelled
//!
//! A failed save leaves everything as it was, so `save` can simply be retried.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog;
use crate::config::{DEFAULT_GREETING_TITLE, GreetingFields, PageContent};
use crate::error::WizardError;
use crate::machine::{Toggle, WizardState};
use crate::steps::{StepKind, WizardStep};
use crate::store::{NewProject, ProjectRecord, ProjectStore};
use crate::sync::{PreviewSlot, PreviewSync};

/// One row of the page manager: a toggleable page and its switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageToggleRow {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub enabled: bool,
}

/// Editor-facing snapshot of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub steps: Vec<WizardStep>,
    pub current_index: usize,
    pub progress: String,
    pub is_last_step: bool,
    pub enabled_pages: Vec<String>,
    pub page_manager: Vec<PageToggleRow>,
    /// Content of the active page step, once it has been edited.
    pub current_page: Option<PageContent>,
    pub recipient_name: String,
    pub greeting_title: String,
    pub saving: bool,
}

pub struct WizardSession {
    id: Uuid,
    state: Arc<Mutex<WizardState>>,
    sync: PreviewSync,
    store: Arc<dyn ProjectStore>,
    saving: AtomicBool,
    finished: AtomicBool,
}

impl WizardSession {
    /// Open a session with default configuration.
    pub fn new(store: Arc<dyn ProjectStore>, slot: PreviewSlot, quiet_interval: Duration) -> Self {
        let state = Arc::new(Mutex::new(WizardState::default()));
        let sync = PreviewSync::new(Arc::clone(&state), slot, quiet_interval);
        Self {
            id: Uuid::new_v4(),
            state,
            sync,
            store,
            saving: AtomicBool::new(false),
            finished: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn preview_slot(&self) -> &PreviewSlot {
        self.sync.slot()
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn view(&self) -> SessionView {
        let state = self.lock();
        let config = state.config();
        let page_manager = catalog::toggleable()
            .map(|p| PageToggleRow { id: p.id, name: p.name, icon: p.icon, enabled: config.is_enabled(p.id) })
            .collect();
        let current_page = state
            .current_step()
            .filter(|step| matches!(step.kind, StepKind::Page(_)))
            .and_then(|step| config.page(step.id))
            .cloned();
        SessionView {
            steps: state.steps().to_vec(),
            current_index: state.current_index(),
            progress: state.progress_label(),
            is_last_step: state.is_last_step(),
            enabled_pages: config.enabled_pages.clone(),
            page_manager,
            current_page,
            recipient_name: config.metadata.customer_name.clone(),
            greeting_title: config
                .greeting()
                .map_or(DEFAULT_GREETING_TITLE, GreetingFields::title_or_default)
                .to_owned(),
            saving: self.is_saving(),
        }
    }

    /// # Errors
    ///
    /// [`WizardError::UnknownField`] for an unknown category or field,
    /// [`WizardError::Finished`] after the session ended.
    pub fn set_field(&self, category: &str, field: &str, value: Value) -> Result<(), WizardError> {
        self.ensure_open()?;
        self.lock().set_field(category, field, value)?;
        self.sync.notify();
        Ok(())
    }

    /// # Errors
    ///
    /// [`WizardError::Finished`] after the session ended.
    pub fn toggle_page(&self, page_id: &str) -> Result<Toggle, WizardError> {
        self.ensure_open()?;
        let outcome = self.lock().toggle_page(page_id);
        if outcome != Toggle::Ignored {
            self.sync.notify();
        }
        Ok(outcome)
    }

    /// # Errors
    ///
    /// [`WizardError::Finished`] after the session ended.
    pub fn go_next(&self) -> Result<bool, WizardError> {
        self.navigate(WizardState::go_next)
    }

    /// # Errors
    ///
    /// [`WizardError::Finished`] after the session ended.
    pub fn go_back(&self) -> Result<bool, WizardError> {
        self.navigate(WizardState::go_back)
    }

    /// # Errors
    ///
    /// [`WizardError::Finished`] after the session ended.
    pub fn go_to(&self, index: usize) -> Result<bool, WizardError> {
        self.navigate(|state| state.go_to(index))
    }

    /// Flush the current state to the preview without waiting for the quiet
    /// interval, e.g. right after a surface attaches.
    pub fn request_preview(&self) {
        if !self.is_finished() {
            self.sync.flush_soon();
        }
    }

    /// Persist the configuration as a new draft project.
    ///
    /// # Errors
    ///
    /// [`WizardError::SaveInProgress`] while another save awaits the store,
    /// [`WizardError::Finished`] after the session ended, and
    /// [`WizardError::Persistence`] carrying the store's message. State is
    /// untouched on error.
    pub async fn save(&self) -> Result<ProjectRecord, WizardError> {
        self.ensure_open()?;
        if self.saving.swap(true, Ordering::SeqCst) {
            return Err(WizardError::SaveInProgress);
        }
        let _saving = SavingGuard(&self.saving);

        let project = NewProject::from_config(self.lock().config());
        match self.store.insert(&project).await {
            Ok(record) => {
                self.finished.store(true, Ordering::SeqCst);
                self.sync.cancel();
                info!(session_id = %self.id, project_id = %record.id, name = %record.name, "wizard project saved");
                Ok(record)
            }
            Err(e) => {
                warn!(session_id = %self.id, error = %e, "wizard save failed");
                Err(e.into())
            }
        }
    }

    /// End the session and drop any pending preview flush.
    pub fn close(&self) {
        self.finished.store(true, Ordering::SeqCst);
        self.sync.cancel();
    }

    fn navigate(&self, step: impl FnOnce(&mut WizardState) -> bool) -> Result<bool, WizardError> {
        self.ensure_open()?;
        let moved = step(&mut *self.lock());
        if moved {
            self.sync.notify();
        }
        Ok(moved)
    }

    fn ensure_open(&self) -> Result<(), WizardError> {
        if self.is_finished() {
            return Err(WizardError::Finished);
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, WizardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the save flag even if the save future is dropped mid-await.
struct SavingGuard<'a>(&'a AtomicBool);

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
