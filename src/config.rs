// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values, and the
//! [`ClientConfig`] assembled from them.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `FX_API_BASE_URL` | Base URL of the f(x) protocol REST API | `https://api.fx.aladdin.club` |
//! | `FX_API_KEY` | API key sent as `x-api-key` | Optional |
//! | `FX_REQUEST_TIMEOUT_SECS` | Per-request timeout | `30` |
//! | `FX_DATA_DIR` | Directory for the cache database and key files | Platform data dir |
//! | `FX_CACHE_MAX_ENTRIES` | Memory tier capacity | `100` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

use crate::cache::CacheConfig;
use crate::error::{ClientError, ClientResult};

/// Environment variable name for the API base URL.
pub const API_BASE_URL_ENV: &str = "FX_API_BASE_URL";

/// Environment variable name for the optional API key.
pub const API_KEY_ENV: &str = "FX_API_KEY";

/// Environment variable name for the request timeout in seconds.
pub const REQUEST_TIMEOUT_ENV: &str = "FX_REQUEST_TIMEOUT_SECS";

/// Environment variable name for the local data directory.
///
/// Holds `cache.redb` (persistent cache tier) and `keys/` (file key store).
pub const DATA_DIR_ENV: &str = "FX_DATA_DIR";

/// Environment variable name for the memory tier capacity.
pub const CACHE_MAX_ENTRIES_ENV: &str = "FX_CACHE_MAX_ENTRIES";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.fx.aladdin.club";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// File name of the persistent cache database inside the data directory.
pub const CACHE_DB_FILE: &str = "cache.redb";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (no trailing slash required)
    pub base_url: url::Url,
    /// Optional API key
    pub api_key: Option<String>,
    /// Fixed timeout applied to every HTTP request
    pub request_timeout: Duration,
    /// Root directory for persistent state
    pub data_dir: PathBuf,
    /// Cache tuning
    pub cache: CacheConfig,
}

impl ClientConfig {
    /// Create a configuration for `base_url` with defaults for everything else.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            api_key: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            data_dir: default_data_dir(),
            cache: CacheConfig::default(),
        })
    }

    /// Load configuration from the environment.
    pub fn from_env() -> ClientResult<Self> {
        let base_url = env::var(API_BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_API_BASE_URL.into());
        let mut config = Self::new(&base_url)?;

        config.api_key = env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty());

        if let Ok(raw) = env::var(REQUEST_TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ClientError::InvalidConfig(format!("{REQUEST_TIMEOUT_ENV} must be an integer, got {raw:?}"))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(raw) = env::var(CACHE_MAX_ENTRIES_ENV) {
            config.cache.max_memory_entries = raw.trim().parse().map_err(|_| {
                ClientError::InvalidConfig(format!(
                    "{CACHE_MAX_ENTRIES_ENV} must be an integer, got {raw:?}"
                ))
            })?;
        }

        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Path of the persistent cache database.
    pub fn cache_db_path(&self) -> PathBuf {
        self.data_dir.join(CACHE_DB_FILE)
    }

    /// Directory of the file key store.
    pub fn keys_dir(&self) -> PathBuf {
        self.data_dir.join("keys")
    }
}

fn parse_base_url(raw: &str) -> ClientResult<url::Url> {
    let url = url::Url::parse(raw)
        .map_err(|e| ClientError::InvalidConfig(format!("Invalid API base URL {raw:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidConfig(format!(
            "API base URL {raw:?} cannot be used as a base"
        )));
    }
    Ok(url)
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "fx-client")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".fx-client"))
}
