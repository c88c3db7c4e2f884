//! Wizard state machine: configuration plus the active step.
//!
//! DESIGN
//! ======
//! `WizardState` is synchronous and free of I/O so every transition can be
//! tested directly. The step list is cached and rebuilt after every mutation;
//! callers only read it.
//!
//! EDGE CASES
//! ==========
//! Switching off the page whose step is active shrinks the sequence under the
//! cursor. The index is clamped to the last valid step so `current_step`
//! always resolves.

use serde_json::Value;

use crate::catalog;
use crate::config::WizardConfiguration;
use crate::error::WizardError;
use crate::steps::{self, WizardStep};

/// Result of a page toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Enabled,
    Disabled,
    /// Unknown id or a page that cannot be switched off. Nothing changed.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct WizardState {
    config: WizardConfiguration,
    steps: Vec<WizardStep>,
    current: usize,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(WizardConfiguration::default())
    }
}

impl WizardState {
    #[must_use]
    pub fn new(config: WizardConfiguration) -> Self {
        let steps = steps::step_sequence(&config);
        Self { config, steps, current: 0 }
    }

    #[must_use]
    pub fn config(&self) -> &WizardConfiguration {
        &self.config
    }

    #[must_use]
    pub fn steps(&self) -> &[WizardStep] {
        &self.steps
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_step(&self) -> Option<&WizardStep> {
        self.steps.get(self.current)
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.current + 1 >= self.steps.len()
    }

    /// Human-readable progress, e.g. `"Step 2 of 4"`.
    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("Step {} of {}", self.current + 1, self.steps.len())
    }

    /// Page id the preview should navigate to for the active step.
    #[must_use]
    pub fn preview_target(&self) -> Option<&'static str> {
        self.current_step().map(WizardStep::preview_page_id)
    }

    /// Replace `category.field`; see [`WizardConfiguration::set_field`].
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::UnknownField`] for categories or fields the
    /// configuration does not have.
    pub fn set_field(&mut self, category: &str, field: &str, value: Value) -> Result<(), WizardError> {
        self.config.set_field(category, field, value)?;
        self.refresh_steps();
        Ok(())
    }

    /// Flip a page's membership in `enabledPages`.
    ///
    /// Enabling appends; disabling filters. Existing entries never move.
    /// Page content is left alone either way.
    pub fn toggle_page(&mut self, page_id: &str) -> Toggle {
        let Some(page) = catalog::find(page_id).filter(|p| p.is_toggleable()) else {
            return Toggle::Ignored;
        };

        let outcome = if self.config.is_enabled(page.id) {
            self.config.enabled_pages.retain(|id| id != page.id);
            Toggle::Disabled
        } else {
            self.config.enabled_pages.push(page.id.to_owned());
            Toggle::Enabled
        };

        self.refresh_steps();
        outcome
    }

    /// Advance one step. No-op on the last step; returns whether the index moved.
    pub fn go_next(&mut self) -> bool {
        if self.is_last_step() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Go back one step. No-op on the first step; returns whether the index moved.
    pub fn go_back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump to a step by index, clamped to the last step.
    pub fn go_to(&mut self, index: usize) -> bool {
        let target = index.min(self.last_index());
        let moved = target != self.current;
        self.current = target;
        moved
    }

    fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    fn refresh_steps(&mut self) {
        self.steps = steps::step_sequence(&self.config);
        self.current = self.current.min(self.last_index());
    }
}

#[cfg(test)]
#[path = "machine_test.rs"]
mod tests;
