//! Project store: the persistence collaborator, injected as a trait object.
//!
//! DESIGN
//! ======
//! Wizard sessions and the dashboard only see [`ProjectStore`]. Hosts choose
//! the backend (hosted REST API, direct Postgres, or [`MemoryProjectStore`])
//! at construction time and hand in an `Arc<dyn ProjectStore>`.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::WizardConfiguration;

/// Theme every project created by the wizard is tagged with.
pub const VALENTINE_THEME: &str = "valentine";

/// Name stored when the operator left the recipient name empty.
pub const UNTITLED_PROJECT_NAME: &str = "Untitled Project";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by project store backends. Display text is shown to the
/// operator as-is.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request never got a response (connect, timeout, TLS).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("store responded with status {status}: {body}")]
    Response { status: u16, body: String },

    /// The backend's answer could not be decoded.
    #[error("could not decode store response: {0}")]
    Decode(String),

    /// Backend-specific failure (database driver, pool, constraint).
    #[error("{0}")]
    Backend(String),
}

// =============================================================================
// RECORDS
// =============================================================================

/// Insert payload for the `projects` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub theme_type: String,
    pub recipient_name: String,
    pub config: WizardConfiguration,
    pub is_live: bool,
}

impl NewProject {
    /// Draft record for a finished wizard configuration.
    #[must_use]
    pub fn from_config(config: &WizardConfiguration) -> Self {
        let recipient = config.metadata.customer_name.clone();
        let name = if recipient.is_empty() { UNTITLED_PROJECT_NAME.to_owned() } else { recipient.clone() };
        Self {
            name,
            theme_type: VALENTINE_THEME.to_owned(),
            recipient_name: recipient,
            config: config.clone(),
            is_live: false,
        }
    }
}

/// A stored project as returned by the store.
///
/// `config` stays raw JSON: rows written by other tools or older theme
/// editors need not match the current configuration schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub name: String,
    pub theme_type: String,
    pub recipient_name: Option<String>,
    pub config: serde_json::Value,
    pub is_live: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Sort order for [`ProjectStore::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl ListOrder {
    #[must_use]
    pub fn is_ascending(self) -> bool {
        matches!(self, Self::OldestFirst)
    }
}

// =============================================================================
// TRAIT
// =============================================================================

#[async_trait::async_trait]
pub trait ProjectStore: Send + Sync {
    /// Insert one project and return the stored row.
    async fn insert(&self, project: &NewProject) -> Result<ProjectRecord, StoreError>;

    /// List all projects ordered by creation time.
    async fn list(&self, order: ListOrder) -> Result<Vec<ProjectRecord>, StoreError>;
}

// =============================================================================
// IN-MEMORY BACKEND
// =============================================================================

/// Process-local store for development and tests.
#[derive(Default)]
pub struct MemoryProjectStore {
    // (insertion sequence, record); the sequence breaks created_at ties.
    rows: Mutex<Vec<(u64, ProjectRecord)>>,
}

impl MemoryProjectStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn insert(&self, project: &NewProject) -> Result<ProjectRecord, StoreError> {
        let config = serde_json::to_value(&project.config).map_err(|e| StoreError::Backend(e.to_string()))?;
        let record = ProjectRecord {
            id: Uuid::new_v4(),
            name: project.name.clone(),
            theme_type: project.theme_type.clone(),
            recipient_name: Some(project.recipient_name.clone()),
            config,
            is_live: project.is_live,
            created_at: OffsetDateTime::now_utc(),
        };

        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        let seq = rows.len() as u64;
        rows.push((seq, record.clone()));
        Ok(record)
    }

    async fn list(&self, order: ListOrder) -> Result<Vec<ProjectRecord>, StoreError> {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner).clone();
        rows.sort_by(|(a_seq, a), (b_seq, b)| a.created_at.cmp(&b.created_at).then(a_seq.cmp(b_seq)));
        if !order.is_ascending() {
            rows.reverse();
        }
        Ok(rows.into_iter().map(|(_, record)| record).collect())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
