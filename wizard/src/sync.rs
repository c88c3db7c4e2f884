//! Preview sync channel: debounced, fire-and-forget delivery to the preview.
//!
//! DESIGN
//! ======
//! Every state change calls [`PreviewSync::notify`], which re-arms the
//! debouncer. When the quiet interval elapses, the flush locks the session
//! state, snapshots the configuration and the preview target, releases the
//! lock, and posts `SYNC_CONFIG` followed by `NAVIGATE_TO_PAGE`.
//!
//! ERROR HANDLING
//! ==============
//! A flush with no attached surface is skipped, not queued: the next change
//! sends the latest state instead. Post failures are logged and dropped.
//! Nothing on this path can fail back into the state machine.

use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::debounce::Debouncer;
use crate::machine::WizardState;
use crate::message::PreviewMessage;

// =============================================================================
// SURFACE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("preview surface closed")]
    Closed,
    #[error("preview surface queue full")]
    Full,
}

/// Receiving end of preview messages, e.g. an embedded frame or a websocket.
pub trait PreviewSurface: Send + Sync {
    /// Post one message. Must not block.
    ///
    /// # Errors
    ///
    /// Returns a [`SurfaceError`] when the surface cannot take the message.
    fn post(&self, message: &PreviewMessage) -> Result<(), SurfaceError>;
}

/// Surface backed by a bounded tokio channel; the receiver forwards to the
/// real renderer.
pub struct ChannelSurface {
    tx: mpsc::Sender<PreviewMessage>,
}

impl ChannelSurface {
    #[must_use]
    pub fn new(tx: mpsc::Sender<PreviewMessage>) -> Self {
        Self { tx }
    }
}

impl PreviewSurface for ChannelSurface {
    fn post(&self, message: &PreviewMessage) -> Result<(), SurfaceError> {
        self.tx.try_send(message.clone()).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SurfaceError::Full,
            mpsc::error::TrySendError::Closed(_) => SurfaceError::Closed,
        })
    }
}

// =============================================================================
// SLOT
// =============================================================================

/// Attachment point for at most one preview surface.
#[derive(Clone, Default)]
pub struct PreviewSlot {
    inner: Arc<RwLock<Option<Arc<dyn PreviewSurface>>>>,
}

impl PreviewSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a surface, replacing any previous one.
    pub fn attach(&self, surface: Arc<dyn PreviewSurface>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(surface);
    }

    /// Detach the current surface. Returns `true` if one was attached.
    pub fn detach(&self) -> bool {
        self.inner.write().unwrap_or_else(PoisonError::into_inner).take().is_some()
    }

    /// Detach `surface` only if it is still the attached one. Returns `true`
    /// if it was removed; a newer surface is left in place.
    pub fn detach_if(&self, surface: &Arc<dyn PreviewSurface>) -> bool {
        let mut current = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if current.as_ref().is_some_and(|attached| same_surface(attached, surface)) {
            *current = None;
            return true;
        }
        false
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    fn current(&self) -> Option<Arc<dyn PreviewSurface>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// Identity by allocation; vtable pointers may differ for the same object.
fn same_surface(a: &Arc<dyn PreviewSurface>, b: &Arc<dyn PreviewSurface>) -> bool {
    std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}

// =============================================================================
// SYNC
// =============================================================================

pub struct PreviewSync {
    debouncer: Debouncer,
    slot: PreviewSlot,
}

impl PreviewSync {
    pub fn new(state: Arc<Mutex<WizardState>>, slot: PreviewSlot, quiet_interval: Duration) -> Self {
        let fire_slot = slot.clone();
        let debouncer = Debouncer::new(quiet_interval, move || {
            flush(&state, &fire_slot);
        });
        Self { debouncer, slot }
    }

    /// Record a state change: cancel any pending flush and arm a new one.
    pub fn notify(&self) {
        self.debouncer.schedule();
    }

    /// Replace any pending flush with one that fires right away.
    pub fn flush_soon(&self) {
        self.debouncer.schedule_after(Duration::ZERO);
    }

    /// Drop any pending flush. Returns `true` if one was waiting.
    pub fn cancel(&self) -> bool {
        self.debouncer.cancel()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    #[must_use]
    pub fn slot(&self) -> &PreviewSlot {
        &self.slot
    }
}

/// Send the current state to the attached surface. Returns the number of
/// messages the surface accepted.
pub fn flush(state: &Mutex<WizardState>, slot: &PreviewSlot) -> usize {
    let Some(surface) = slot.current() else {
        debug!("preview not attached; skipping flush");
        return 0;
    };

    let messages = {
        let state = state.lock().unwrap_or_else(PoisonError::into_inner);
        PreviewMessage::flush_pair(state.config().clone(), state.preview_target())
    };

    let mut delivered = 0;
    for message in &messages {
        match surface.post(message) {
            Ok(()) => delivered += 1,
            Err(e) => {
                warn!(error = %e, kind = message.kind(), "preview post failed; dropping flush");
                break;
            }
        }
    }
    delivered
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
