//! Step sequence: a pure projection of the enabled pages.
//!
//! The sequence is two fixed base steps followed by one step per enabled,
//! toggleable page in catalog order. It is recomputed after every change and
//! never edited directly.

use serde::Serialize;

use crate::catalog::{self, PageKind};
use crate::config::WizardConfiguration;

pub const SETUP_STEP_ID: &str = "setup";
pub const PAGE_MANAGER_STEP_ID: &str = "page-manager";

/// What an individual step edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "step", content = "type", rename_all = "snake_case")]
pub enum StepKind {
    Setup,
    PageManager,
    Page(PageKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WizardStep {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    /// Heading shown above the step's editor.
    pub title: &'static str,
    pub kind: StepKind,
}

impl WizardStep {
    /// Page id the preview should show while this step is active.
    #[must_use]
    pub fn preview_page_id(&self) -> &'static str {
        match self.kind {
            StepKind::Setup => catalog::first_page().id,
            StepKind::PageManager | StepKind::Page(_) => self.id,
        }
    }
}

pub const BASE_STEPS: [WizardStep; 2] = [
    WizardStep {
        id: SETUP_STEP_ID,
        name: "Setup",
        icon: "palette",
        title: "Theme & Names",
        kind: StepKind::Setup,
    },
    WizardStep {
        id: PAGE_MANAGER_STEP_ID,
        name: "Page Manager",
        icon: "dashboard_customize",
        title: "Choose Your Pages",
        kind: StepKind::PageManager,
    },
];

/// Build the step sequence for a configuration.
#[must_use]
pub fn step_sequence(config: &WizardConfiguration) -> Vec<WizardStep> {
    let pages = config
        .enabled_in_catalog_order()
        .into_iter()
        .filter(|p| p.is_toggleable())
        .map(|p| WizardStep { id: p.id, name: p.name, icon: p.icon, title: p.name, kind: StepKind::Page(p.kind) });

    BASE_STEPS.iter().copied().chain(pages).collect()
}

#[cfg(test)]
#[path = "steps_test.rs"]
mod tests;
