//! Client configuration
//!
//! Everything is environment-driven: the backend base URL and the local
//! data directory both have defaults that match a development setup.

use crate::error::{AppError, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "MEUPORTEFOLIO_API_URL";

/// Environment variable overriding the local data directory.
pub const DATA_DIR_ENV: &str = "MEUPORTEFOLIO_DATA_DIR";

/// Default backend base URL, including the version prefix.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";

/// Deadline applied to the extended-profile fetch. This is the only call
/// site with an explicit client-side timeout.
pub const PROFILE_TIMEOUT_SECS: u64 = 10;

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL (includes the `/api/v1` prefix)
    pub api_base: Url,

    /// Directory holding the persisted session blob
    pub data_dir: PathBuf,

    /// Deadline for the extended-profile fetch
    pub profile_timeout: Duration,
}

impl Config {
    /// Build configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_base = Url::parse(&raw)
            .map_err(|e| AppError::Config(format!("Invalid API base URL '{}': {}", raw, e)))?;

        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir(),
        };

        Ok(Self {
            api_base,
            data_dir,
            profile_timeout: Duration::from_secs(PROFILE_TIMEOUT_SECS),
        })
    }

    /// Origin of the backend (scheme + host + port), without the version
    /// prefix. The health probe lives here rather than under `/api/v1`.
    pub fn api_origin(&self) -> Url {
        let mut origin = self.api_base.clone();
        origin.set_path("");
        origin.set_query(None);
        origin
    }
}

fn default_data_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".meuportefolio"),
        None => PathBuf::from(".meuportefolio"),
    }
}
