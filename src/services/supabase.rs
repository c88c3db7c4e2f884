//! Hosted Supabase project store over the PostgREST API.
//!
//! DESIGN
//! ======
//! Talks to `{SUPABASE_URL}/rest/v1/projects` with the anon key in both the
//! `apikey` and bearer headers. Inserts ask for `return=representation` so
//! the stored row (id, `created_at`) comes back in the same round trip.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures become [`StoreError::Request`]. Non-2xx answers become
//! [`StoreError::Response`], carrying PostgREST's `message` field when the
//! body has one so the operator sees the backend's own wording.

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use wizard::{ListOrder, NewProject, ProjectRecord, ProjectStore, StoreError};

use crate::config::StoreTimeouts;

const PROJECTS_PATH: &str = "/rest/v1/projects";

pub struct SupabaseProjectStore {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseProjectStore {
    /// # Errors
    ///
    /// Returns [`StoreError::Request`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, anon_key: String, timeouts: StoreTimeouts) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| StoreError::Request(format!("http client build failed: {e}")))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string(), anon_key })
    }

    fn projects_url(&self) -> String {
        format!("{}{PROJECTS_PATH}", self.base_url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("apikey", &self.anon_key).bearer_auth(&self.anon_key)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, StoreError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| StoreError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(StoreError::Response { status: status.as_u16(), body: error_message(&text) });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl ProjectStore for SupabaseProjectStore {
    async fn insert(&self, project: &NewProject) -> Result<ProjectRecord, StoreError> {
        let request = self
            .http
            .post(self.projects_url())
            .header("Prefer", "return=representation")
            .json(&[project]);
        let text = self.send(request).await?;
        parse_inserted(&text)
    }

    async fn list(&self, order: ListOrder) -> Result<Vec<ProjectRecord>, StoreError> {
        let request = self.http.get(self.projects_url()).query(&list_params(order));
        let text = self.send(request).await?;
        let records = parse_records(&text)?;
        debug!(count = records.len(), "supabase: listed projects");
        Ok(records)
    }
}

// =============================================================================
// WIRE HELPERS
// =============================================================================

#[derive(Serialize)]
pub(crate) struct ListParams {
    select: &'static str,
    order: &'static str,
}

pub(crate) fn list_params(order: ListOrder) -> ListParams {
    let order = if order.is_ascending() { "created_at.asc" } else { "created_at.desc" };
    ListParams { select: "*", order }
}

pub(crate) fn parse_records(text: &str) -> Result<Vec<ProjectRecord>, StoreError> {
    serde_json::from_str(text).map_err(|e| StoreError::Decode(e.to_string()))
}

pub(crate) fn parse_inserted(text: &str) -> Result<ProjectRecord, StoreError> {
    parse_records(text)?
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::Decode("insert returned no rows".into()))
}

#[derive(Deserialize)]
struct PostgrestError {
    message: String,
}

/// PostgREST error bodies carry a `message`; anything else is passed through.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<PostgrestError>(body).map_or_else(|_| body.to_string(), |e| e.message)
}

#[cfg(test)]
#[path = "supabase_test.rs"]
mod tests;
