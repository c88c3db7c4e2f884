pub mod postgres;
pub mod session;
pub mod supabase;

use std::sync::Arc;

use tracing::info;
use wizard::{MemoryProjectStore, ProjectStore, StoreError};

use crate::config::StoreBackend;
use crate::db;

/// Build the configured project store.
///
/// # Errors
///
/// Returns [`StoreError::Backend`] if the database cannot be reached or
/// migrated, and [`StoreError::Request`] if the HTTP client cannot be built.
pub async fn connect_store(backend: &StoreBackend) -> Result<Arc<dyn ProjectStore>, StoreError> {
    let store: Arc<dyn ProjectStore> = match backend {
        StoreBackend::Postgres { database_url, max_connections } => {
            let pool = db::init_pool(database_url, *max_connections)
                .await
                .map_err(|e| StoreError::Backend(format!("database init failed: {e}")))?;
            Arc::new(postgres::PgProjectStore::new(pool))
        }
        StoreBackend::Supabase { url, anon_key, timeouts } => {
            Arc::new(supabase::SupabaseProjectStore::new(url, anon_key.clone(), *timeouts)?)
        }
        StoreBackend::Memory => Arc::new(MemoryProjectStore::new()),
    };
    info!(backend = backend.name(), "project store ready");
    Ok(store)
}
