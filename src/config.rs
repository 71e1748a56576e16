//! Configuration Module
//!
//! Handles loading the worker and server configuration from environment variables.

use std::env;

use url::Url;

use crate::error::{Result, WorkerError};
use crate::worker::WorkerSettings;

/// Default cache generation tag
pub const DEFAULT_CACHE_VERSION: &str = "fahrschul-app-v1.0";

/// Default offline fallback document
pub const DEFAULT_OFFLINE_URL: &str = "/offline.html";

/// Default app shell assets
pub const DEFAULT_PRECACHE_URLS: [&str; 4] =
    ["/", "/fahrschul.html", "/manifest.json", DEFAULT_OFFLINE_URL];

/// Server and worker configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Origin whose traffic the worker serves
    pub origin_url: String,
    /// Version tag naming the current cache store
    pub cache_version: String,
    /// Asset manifest installed into the store
    pub precache_urls: Vec<String>,
    /// Document served for failed navigations
    pub offline_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `ORIGIN_URL` - Origin to serve (default: http://127.0.0.1:8000)
    /// - `CACHE_VERSION` - Cache version tag (default: fahrschul-app-v1.0)
    /// - `PRECACHE_URLS` - Comma-separated asset manifest
    /// - `OFFLINE_URL` - Offline fallback document (default: /offline.html)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            origin_url: env::var("ORIGIN_URL").unwrap_or(defaults.origin_url),
            cache_version: env::var("CACHE_VERSION").unwrap_or(defaults.cache_version),
            precache_urls: env::var("PRECACHE_URLS")
                .ok()
                .map(|v| parse_list(&v))
                .unwrap_or(defaults.precache_urls),
            offline_url: env::var("OFFLINE_URL").unwrap_or(defaults.offline_url),
        }
    }

    /// Resolves the configuration into the settings the worker runs with.
    pub fn worker_settings(&self) -> Result<WorkerSettings> {
        if self.cache_version.trim().is_empty() {
            return Err(WorkerError::Config(
                "CACHE_VERSION cannot be empty".to_string(),
            ));
        }

        let origin = Url::parse(&self.origin_url).map_err(|e| {
            WorkerError::Config(format!("invalid ORIGIN_URL '{}': {}", self.origin_url, e))
        })?;

        if origin.cannot_be_a_base() {
            return Err(WorkerError::Config(format!(
                "ORIGIN_URL '{}' cannot be used as a base URL",
                self.origin_url
            )));
        }

        Ok(WorkerSettings {
            cache_name: self.cache_version.clone(),
            origin,
            precache: self.precache_urls.clone(),
            offline_url: self.offline_url.clone(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            origin_url: "http://127.0.0.1:8000".to_string(),
            cache_version: DEFAULT_CACHE_VERSION.to_string(),
            precache_urls: DEFAULT_PRECACHE_URLS.iter().map(|s| s.to_string()).collect(),
            offline_url: DEFAULT_OFFLINE_URL.to_string(),
        }
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
