//! Direct Postgres project store.

use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;
use wizard::{ListOrder, NewProject, ProjectRecord, ProjectStore, StoreError};

type ProjectRow = (Uuid, String, String, Option<String>, serde_json::Value, bool, OffsetDateTime);

const PROJECT_COLUMNS: &str = "id, name, theme_type, recipient_name, config, is_live, created_at";

pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn to_record((id, name, theme_type, recipient_name, config, is_live, created_at): ProjectRow) -> ProjectRecord {
    ProjectRecord { id, name, theme_type, recipient_name, config, is_live, created_at }
}

fn database_error(err: sqlx::Error) -> StoreError {
    StoreError::Backend(format!("database error: {err}"))
}

pub(crate) fn list_query(order: ListOrder) -> String {
    let direction = if order.is_ascending() { "ASC" } else { "DESC" };
    format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at {direction}, id {direction}")
}

#[async_trait::async_trait]
impl ProjectStore for PgProjectStore {
    async fn insert(&self, project: &NewProject) -> Result<ProjectRecord, StoreError> {
        let config = serde_json::to_value(&project.config).map_err(|e| StoreError::Backend(e.to_string()))?;
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "INSERT INTO projects (name, theme_type, recipient_name, config, is_live)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(&project.name)
        .bind(&project.theme_type)
        .bind(&project.recipient_name)
        .bind(config)
        .bind(project.is_live)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(to_record(row))
    }

    async fn list(&self, order: ListOrder) -> Result<Vec<ProjectRecord>, StoreError> {
        let rows = sqlx::query_as::<_, ProjectRow>(&list_query(order))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(rows.into_iter().map(to_record).collect())
    }
}

#[cfg(test)]
#[path = "postgres_test.rs"]
mod tests;
