//! Cache Storage Module
//!
//! The named-store primitive the worker runs against, and its in-memory
//! implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::try_join_all;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::error::{Result, WorkerError};
use crate::net::{Network, Request, Response};

/// Named, versioned response stores owned by the host.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Opens the store, creating it if absent.
    async fn open(&self, name: &str) -> Result<()>;

    /// Names of all existing stores.
    async fn keys(&self) -> Result<Vec<String>>;

    /// Deletes a store. Returns whether a store by that name existed.
    async fn delete(&self, name: &str) -> Result<bool>;

    /// Looks up a request in one store. A missing store matches nothing.
    async fn lookup(&self, name: &str, request: &Request) -> Result<Option<Response>>;

    /// Writes one response, creating the store if absent.
    async fn put(&self, name: &str, request: &Request, response: Response) -> Result<()>;

    /// Writes every pair, or none of them.
    async fn put_all(&self, name: &str, entries: Vec<(Request, Response)>) -> Result<()>;

    /// Fetches every request and stores the responses all-or-nothing.
    ///
    /// Fails without writing anything if any fetch fails or returns a
    /// non-2xx status.
    async fn add_all(
        &self,
        name: &str,
        requests: Vec<Request>,
        network: &dyn Network,
    ) -> Result<()> {
        let fetches = requests.into_iter().map(|request| async move {
            let response = network.fetch(&request).await.map_err(|e| {
                WorkerError::Install(format!("failed to fetch {}: {}", request.url, e))
            })?;

            if !response.is_ok() {
                return Err(WorkerError::Install(format!(
                    "{} returned {}",
                    request.url, response.status
                )));
            }

            Ok::<_, WorkerError>((request, response))
        });

        let entries = try_join_all(fetches).await?;
        self.put_all(name, entries).await
    }
}

#[derive(Debug, Default)]
struct StorageState {
    stores: HashMap<String, CacheStore>,
    stats: CacheStats,
}

impl StorageState {
    fn refresh_total(&mut self) {
        let total = self.stores.values().map(CacheStore::len).sum();
        self.stats.set_total_entries(total);
    }
}

// == Memory Storage ==
/// In-process cache storage behind a tokio RwLock.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: RwLock<StorageState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of storage activity.
    pub async fn stats(&self) -> CacheStats {
        self.state.read().await.stats.clone()
    }

    /// Number of entries in one store, or None if it does not exist.
    pub async fn store_len(&self, name: &str) -> Option<usize> {
        self.state.read().await.stores.get(name).map(CacheStore::len)
    }
}

#[async_trait]
impl CacheStorage for MemoryStorage {
    async fn open(&self, name: &str) -> Result<()> {
        let mut state = self.state.write().await;
        state.stats.record_open();
        state.stores.entry(name.to_string()).or_default();
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let state = self.state.read().await;
        let mut names: Vec<String> = state.stores.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        let existed = state.stores.remove(name).is_some();
        if existed {
            state.stats.record_deletion();
            state.refresh_total();
        }
        Ok(existed)
    }

    async fn lookup(&self, name: &str, request: &Request) -> Result<Option<Response>> {
        // Write lock: lookups update statistics
        let mut state = self.state.write().await;
        let found = state
            .stores
            .get(name)
            .and_then(|store| store.get(request));

        match found {
            Some(_) => state.stats.record_hit(),
            None => state.stats.record_miss(),
        }
        Ok(found)
    }

    async fn put(&self, name: &str, request: &Request, response: Response) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .stores
            .entry(name.to_string())
            .or_default()
            .put(request, response)?;
        state.stats.record_writes(1);
        state.refresh_total();
        Ok(())
    }

    async fn put_all(&self, name: &str, entries: Vec<(Request, Response)>) -> Result<()> {
        if let Some((request, _)) = entries
            .iter()
            .find(|(request, _)| request.method != axum::http::Method::GET)
        {
            return Err(WorkerError::InvalidRequest(format!(
                "cannot store a {} request: {}",
                request.method, request.url
            )));
        }

        let count = entries.len();
        let mut state = self.state.write().await;
        let store = state.stores.entry(name.to_string()).or_default();
        for (request, response) in entries {
            store.put(&request, response)?;
        }
        state.stats.record_writes(count);
        state.refresh_total();

        debug!("Stored {} entries in cache '{}'", count, name);
        Ok(())
    }
}
