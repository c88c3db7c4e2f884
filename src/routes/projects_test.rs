use super::*;
use std::sync::Arc;
use wizard::{ListOrder, NewProject, ProjectRecord, ProjectStore, WizardConfiguration};

use crate::state::test_helpers;

struct DownStore;

#[async_trait::async_trait]
impl ProjectStore for DownStore {
    async fn insert(&self, _project: &NewProject) -> Result<ProjectRecord, StoreError> {
        Err(StoreError::Request("connection refused".into()))
    }

    async fn list(&self, _order: ListOrder) -> Result<Vec<ProjectRecord>, StoreError> {
        Err(StoreError::Response { status: 401, body: "Invalid API key".into() })
    }
}

#[tokio::test]
async fn list_projects_returns_dashboard() {
    let state = test_helpers::test_app_state();
    let mut config = WizardConfiguration::default();
    config.metadata.customer_name = "Mei".into();
    state.store.insert(&NewProject::from_config(&config)).await.unwrap();

    let Json(dashboard) = list_projects(State(state)).await.unwrap();
    assert_eq!(dashboard.total, 1);
    assert_eq!(dashboard.total_label, "01");
    assert_eq!(dashboard.projects[0].name, "Mei");
}

#[tokio::test]
async fn store_failure_maps_to_bad_gateway() {
    let state = test_helpers::test_app_state_with_store(Arc::new(DownStore));
    let (status, body) = list_projects(State(state)).await.unwrap_err();
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, "store responded with status 401: Invalid API key");
}

#[tokio::test]
async fn catalog_lists_pages_and_base_steps() {
    let Json(catalog) = catalog().await;
    assert_eq!(catalog.pages.len(), 10);
    assert_eq!(catalog.pages[0].id, "page-1");
    assert_eq!(catalog.base_steps[1].id, "page-manager");

    let value = serde_json::to_value(&catalog).unwrap();
    assert_eq!(value["pages"][5]["kind"], "gallery");
}
