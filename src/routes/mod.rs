//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API, the editor and preview websockets, and the
//! static site under a single Axum router. Anything no route claims falls
//! through to files under the configured website directory.

pub mod editor;
pub mod preview;
pub mod projects;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/catalog", get(projects::catalog))
        .route("/api/projects", get(projects::list_projects))
        .route("/api/wizard/ws", get(editor::handle_ws))
        .route("/api/preview/ws", get(preview::handle_ws))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// API routes plus the static site fallback.
pub fn app(state: AppState) -> Router {
    let website = ServeDir::new(state.website_dir.as_path()).append_index_html_on_directories(true);

    api_routes(state)
        .fallback_service(website)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
