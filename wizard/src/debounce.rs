//! Debounce primitive: cancel the pending emission, arm a new one.
//!
//! DESIGN
//! ======
//! Each `schedule` aborts the armed timer task and spawns a fresh one, so the
//! action runs once per quiet period no matter how many calls arrive inside
//! it. The action captures its own state handles and reads them when it
//! fires, which is what makes the last write win.
//!
//! Dropping the debouncer aborts the armed timer. Nothing fires after teardown.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::warn;

pub const DEFAULT_QUIET_INTERVAL: Duration = Duration::from_millis(500);

type Action = Arc<dyn Fn() + Send + Sync>;

pub struct Debouncer {
    delay: Duration,
    action: Action,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration, action: impl Fn() + Send + Sync + 'static) -> Self {
        Self { delay, action: Arc::new(action), pending: Mutex::new(None) }
    }

    /// Re-arm the timer with the configured quiet interval.
    pub fn schedule(&self) {
        self.schedule_after(self.delay);
    }

    /// Re-arm the timer with an explicit delay.
    ///
    /// Outside a Tokio runtime the call is logged and dropped.
    pub fn schedule_after(&self, delay: Duration) {
        let Ok(handle) = Handle::try_current() else {
            warn!("debounce scheduled outside a tokio runtime; dropping");
            return;
        };

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let action = Arc::clone(&self.action);
        *pending = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        }));
    }

    /// Abort the armed timer. Returns `true` if one was still waiting.
    pub fn cancel(&self) -> bool {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        match pending.take() {
            Some(task) => {
                let was_waiting = !task.is_finished();
                task.abort();
                was_waiting
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "debounce_test.rs"]
mod tests;
