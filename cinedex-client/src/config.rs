//! Client configuration sourced from the environment.

use cinedex_core::{CatalogError, DiskStore, StoreError, TmdbCatalogClient, catalog::TMDB_API_BASE};
use directories::ProjectDirs;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::domains::search::SEARCH_DEBOUNCE;

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No catalog API key; set CINEDEX_TMDB_API_KEY or TMDB_API_KEY")]
    MissingApiKey,
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("Could not determine a data directory; set CINEDEX_DATA_DIR")]
    NoDataDir,
}

#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub api_base: String,
    pub data_dir: PathBuf,
    pub debounce: Duration,
    pub http_timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("data_dir", &self.data_dir)
            .field("debounce", &self.debounce)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl ClientConfig {
    pub fn from_environment() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get("CINEDEX_TMDB_API_KEY")
            .or_else(|| get("TMDB_API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;

        let api_base = match get("CINEDEX_API_BASE") {
            Some(raw) => parse_base_url("CINEDEX_API_BASE", raw)?,
            None => TMDB_API_BASE.to_string(),
        };

        let data_dir = match get("CINEDEX_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => ProjectDirs::from("org", "cinedex", "cinedex")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or(ConfigError::NoDataDir)?,
        };

        let debounce = match get("CINEDEX_DEBOUNCE_MS") {
            Some(raw) => Duration::from_millis(parse_number("CINEDEX_DEBOUNCE_MS", &raw)?),
            None => SEARCH_DEBOUNCE,
        };

        let http_timeout = match get("CINEDEX_HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number("CINEDEX_HTTP_TIMEOUT_SECS", &raw)?),
            None => DEFAULT_HTTP_TIMEOUT,
        };

        Ok(Self {
            api_key,
            api_base,
            data_dir,
            debounce,
            http_timeout,
        })
    }

    pub fn catalog_client(&self) -> Result<TmdbCatalogClient, CatalogError> {
        Ok(TmdbCatalogClient::with_timeout(self.api_key.clone(), self.http_timeout)?
            .with_base_url(self.api_base.clone()))
    }

    pub fn open_store(&self) -> Result<DiskStore, StoreError> {
        DiskStore::open(self.data_dir.join("store"))
    }
}

/// Request paths are appended as segments, so the base must be hierarchical.
fn parse_base_url(key: &'static str, raw: String) -> Result<String, ConfigError> {
    match Url::parse(&raw) {
        Ok(url) if !url.cannot_be_a_base() => Ok(raw),
        _ => Err(ConfigError::InvalidValue { key, value: raw }),
    }
}

fn parse_number(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}
