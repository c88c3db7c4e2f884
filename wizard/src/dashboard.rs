//! Dashboard listing: saved projects, newest first.

use serde::Serialize;
use uuid::Uuid;

use crate::store::{ListOrder, ProjectRecord, ProjectStore, StoreError};

/// Publication state shown in the status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProjectStatus {
    Live,
    Draft,
}

/// Theme badge colour family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeBadge {
    Rose,
    Sky,
    Emerald,
}

impl ThemeBadge {
    #[must_use]
    pub fn for_theme(theme_type: &str) -> Self {
        match theme_type {
            "valentine" => Self::Rose,
            "birthday" => Self::Sky,
            _ => Self::Emerald,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRow {
    pub id: Uuid,
    pub name: String,
    pub theme_type: String,
    pub badge: ThemeBadge,
    pub status: ProjectStatus,
}

impl From<&ProjectRecord> for ProjectRow {
    fn from(record: &ProjectRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            theme_type: record.theme_type.clone(),
            badge: ThemeBadge::for_theme(&record.theme_type),
            status: if record.is_live { ProjectStatus::Live } else { ProjectStatus::Draft },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub projects: Vec<ProjectRow>,
    pub total: usize,
    /// Total as a two-digit label, e.g. `"07"`.
    pub total_label: String,
    pub live: usize,
}

impl Dashboard {
    #[must_use]
    pub fn from_records(records: &[ProjectRecord]) -> Self {
        let projects: Vec<ProjectRow> = records.iter().map(ProjectRow::from).collect();
        let total = projects.len();
        let live = projects.iter().filter(|p| p.status == ProjectStatus::Live).count();
        Self { projects, total, total_label: format!("{total:02}"), live }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// Load the dashboard from the store, newest project first.
///
/// # Errors
///
/// Propagates the store's error.
pub async fn load(store: &dyn ProjectStore) -> Result<Dashboard, StoreError> {
    let records = store.list(ListOrder::NewestFirst).await?;
    Ok(Dashboard::from_records(&records))
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
