//! Worker Module
//!
//! The offline cache worker: lifecycle hooks for install, activate, fetch
//! and sync, running against injected cache storage and network primitives.
//!
//! # Hooks
//! - `install` - Pre-populates the versioned store with the app shell
//! - `activate` - Sweeps stores left over from previous versions
//! - `fetch` - Cache first, network fallback, opportunistic write
//! - `sync` - Reserved background-sync hook

mod fetch;
mod lifecycle;
mod sync;

use std::sync::Arc;

use url::Url;

use crate::cache::CacheStorage;
use crate::error::{Result, WorkerError};
use crate::net::Network;

pub use fetch::{FetchOutcome, ResponseSource, EXCLUDED_SCHEMES};
pub use sync::{SyncOutcome, BACKGROUND_SYNC_TAG};

// == Worker Settings ==
/// Constants one worker version runs with.
#[derive(Debug, Clone)]
pub struct WorkerSettings {
    /// Version tag naming the current store
    pub cache_name: String,
    /// Origin relative manifest paths resolve against
    pub origin: Url,
    /// Asset manifest required at install
    pub precache: Vec<String>,
    /// Document served for failed navigations
    pub offline_url: String,
}

impl WorkerSettings {
    /// Resolves a manifest path against the origin.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        self.origin
            .join(path)
            .map_err(|e| WorkerError::Config(format!("invalid asset URL '{}': {}", path, e)))
    }
}

// == Offline Worker ==
/// One version of the offline cache worker.
///
/// Holds no cache state of its own; every store access goes through the
/// injected [`CacheStorage`].
#[derive(Clone)]
pub struct OfflineWorker {
    settings: WorkerSettings,
    caches: Arc<dyn CacheStorage>,
    network: Arc<dyn Network>,
}

impl OfflineWorker {
    pub fn new(
        settings: WorkerSettings,
        caches: Arc<dyn CacheStorage>,
        network: Arc<dyn Network>,
    ) -> Self {
        Self {
            settings,
            caches,
            network,
        }
    }

    pub fn settings(&self) -> &WorkerSettings {
        &self.settings
    }

    /// Name of the store this version owns.
    pub fn cache_name(&self) -> &str {
        &self.settings.cache_name
    }
}
