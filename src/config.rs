//! Server configuration parsed from environment variables.
//!
//! Optional (all):
//! - `PORT`: listen port, default 3000
//! - `STORE_BACKEND`: `postgres`, `supabase`, or `memory`. When unset the
//!   backend is inferred: `DATABASE_URL` → postgres, `SUPABASE_URL` →
//!   supabase, otherwise memory.
//! - `DATABASE_URL`, `DB_MAX_CONNECTIONS` (default 5)
//! - `SUPABASE_URL`, `SUPABASE_ANON_KEY`
//! - `STORE_REQUEST_TIMEOUT_SECS` (default 30), `STORE_CONNECT_TIMEOUT_SECS` (default 10)
//! - `PREVIEW_DEBOUNCE_MS`: preview quiet interval, default 500
//! - `WEBSITE_DIR`: static marketing site root

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_PREVIEW_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_STORE_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_STORE_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("unknown STORE_BACKEND: {0}")]
    UnknownBackend(String),
    #[error("missing env var {var} (required by the {backend} store)")]
    Missing { var: &'static str, backend: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String, max_connections: u32 },
    Supabase { url: String, anon_key: String, timeouts: StoreTimeouts },
    Memory,
}

impl StoreBackend {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Postgres { .. } => "postgres",
            Self::Supabase { .. } => "supabase",
            Self::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub store: StoreBackend,
    pub preview_debounce: Duration,
    pub website_dir: PathBuf,
}

impl AppConfig {
    /// Build typed config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for malformed values or a backend missing
    /// its connection settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from any key lookup.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let store = parse_backend(&lookup)?;
        let preview_debounce =
            Duration::from_millis(env_parse(&lookup, "PREVIEW_DEBOUNCE_MS", DEFAULT_PREVIEW_DEBOUNCE_MS));
        let website_dir = lookup("WEBSITE_DIR")
            .map_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("website"), PathBuf::from);

        Ok(Self { port, store, preview_debounce, website_dir })
    }
}

fn parse_backend(lookup: &impl Fn(&str) -> Option<String>) -> Result<StoreBackend, ConfigError> {
    let database_url = lookup("DATABASE_URL").filter(|v| !v.is_empty());
    let supabase_url = lookup("SUPABASE_URL").filter(|v| !v.is_empty());

    let kind = match lookup("STORE_BACKEND") {
        Some(raw) => raw.trim().to_ascii_lowercase(),
        None if database_url.is_some() => "postgres".to_owned(),
        None if supabase_url.is_some() => "supabase".to_owned(),
        None => "memory".to_owned(),
    };

    match kind.as_str() {
        "postgres" => Ok(StoreBackend::Postgres {
            database_url: database_url.ok_or(ConfigError::Missing { var: "DATABASE_URL", backend: "postgres" })?,
            max_connections: env_parse(lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
        }),
        "supabase" => Ok(StoreBackend::Supabase {
            url: supabase_url
                .ok_or(ConfigError::Missing { var: "SUPABASE_URL", backend: "supabase" })?
                .trim_end_matches('/')
                .to_owned(),
            anon_key: lookup("SUPABASE_ANON_KEY")
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing { var: "SUPABASE_ANON_KEY", backend: "supabase" })?,
            timeouts: StoreTimeouts {
                request_secs: env_parse(lookup, "STORE_REQUEST_TIMEOUT_SECS", DEFAULT_STORE_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse(lookup, "STORE_CONNECT_TIMEOUT_SECS", DEFAULT_STORE_CONNECT_TIMEOUT_SECS),
            },
        }),
        "memory" => Ok(StoreBackend::Memory),
        other => Err(ConfigError::UnknownBackend(other.to_owned())),
    }
}

fn env_parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
