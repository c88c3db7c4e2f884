//! Project dashboard and page catalog routes.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use tracing::error;
use wizard::dashboard::{self, Dashboard};
use wizard::steps::BASE_STEPS;
use wizard::{PAGE_CATALOG, PageDescriptor, StoreError, WizardStep};

use crate::state::AppState;

/// `GET /api/projects`: saved projects, newest first, with totals.
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Dashboard>, (StatusCode, String)> {
    dashboard::load(state.store.as_ref())
        .await
        .map(Json)
        .map_err(store_error_to_status)
}

pub(crate) fn store_error_to_status(err: StoreError) -> (StatusCode, String) {
    error!(error = %err, "project store request failed");
    (StatusCode::BAD_GATEWAY, err.to_string())
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub pages: &'static [PageDescriptor],
    pub base_steps: &'static [WizardStep],
}

/// `GET /api/catalog`: the fixed page catalog and the always-present steps.
pub async fn catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse { pages: &PAGE_CATALOG, base_steps: &BASE_STEPS })
}

#[cfg(test)]
#[path = "projects_test.rs"]
mod tests;
