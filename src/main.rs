mod config;
mod db;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid configuration");
    let store = services::connect_store(&config.store)
        .await
        .expect("project store init failed");
    let state = state::AppState::new(store, config.preview_debounce, config.website_dir.clone());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, backend = config.store.name(), "atelier listening");
    axum::serve(listener, app).await.expect("server failed");
}
