//! Preview messages: what the wizard tells the embedded preview.
//!
//! The preview renderer understands exactly two message kinds and never
//! replies. Both are JSON objects tagged by `type`.

use serde::{Deserialize, Serialize};

use crate::config::WizardConfiguration;

pub const SYNC_CONFIG: &str = "SYNC_CONFIG";
pub const NAVIGATE_TO_PAGE: &str = "NAVIGATE_TO_PAGE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PreviewMessage {
    /// Replace the preview's whole configuration.
    #[serde(rename = "SYNC_CONFIG")]
    SyncConfig { config: WizardConfiguration },
    /// Show the given page.
    #[serde(rename = "NAVIGATE_TO_PAGE")]
    NavigateToPage {
        #[serde(rename = "pageId")]
        page_id: String,
    },
}

impl PreviewMessage {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SyncConfig { .. } => SYNC_CONFIG,
            Self::NavigateToPage { .. } => NAVIGATE_TO_PAGE,
        }
    }

    /// The messages for one flush: the config first, then navigation when a
    /// step is active.
    #[must_use]
    pub fn flush_pair(config: WizardConfiguration, page_id: Option<&str>) -> Vec<Self> {
        let mut out = vec![Self::SyncConfig { config }];
        if let Some(page_id) = page_id {
            out.push(Self::NavigateToPage { page_id: page_id.to_owned() });
        }
        out
    }

    /// Encode as JSON text.
    ///
    /// # Errors
    ///
    /// Returns a serde error if the configuration holds a value JSON cannot express.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
