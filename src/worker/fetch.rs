//! Fetch interception: cache first, network fallback, opportunistic write.

use axum::http::Method;
use tracing::{debug, info, warn};

use crate::error::{Result, WorkerError};
use crate::net::{Request, Response};
use crate::worker::OfflineWorker;

/// Extension-internal schemes the worker never handles.
pub const EXCLUDED_SCHEMES: [&str; 2] = ["chrome-extension", "moz-extension"];

/// Where a handled response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Cache,
    Network,
    OfflineFallback,
}

/// Result of a fetch event.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Left unhandled; the host performs the request natively
    Passthrough,
    /// Answered by the worker
    Respond {
        response: Response,
        source: ResponseSource,
    },
}

impl FetchOutcome {
    fn respond(response: Response, source: ResponseSource) -> Self {
        FetchOutcome::Respond { response, source }
    }
}

/// True when the worker should handle the request at all.
pub(crate) fn should_intercept(request: &Request) -> bool {
    request.method == Method::GET && !EXCLUDED_SCHEMES.contains(&request.url.scheme())
}

impl OfflineWorker {
    // == Fetch ==
    /// Handles one intercepted request.
    ///
    /// The store is always consulted before the network. Only 200 same-origin
    /// responses without per-user state are written back. A network failure is answered with the
    /// offline document for navigations and returned as an error otherwise.
    pub async fn fetch(&self, request: &Request) -> Result<FetchOutcome> {
        if !should_intercept(request) {
            debug!("Passing through {} {}", request.method, request.url);
            return Ok(FetchOutcome::Passthrough);
        }

        let name = self.cache_name();
        if let Some(cached) = self.caches.lookup(name, request).await? {
            debug!("Serving from cache: {}", request.url);
            return Ok(FetchOutcome::respond(cached, ResponseSource::Cache));
        }

        match self.network.fetch(request).await {
            Ok(response) => {
                if response.is_cacheable() {
                    let copy = response.duplicate();
                    if let Err(e) = self.caches.put(name, request, copy).await {
                        warn!("Failed to cache {}: {}", request.url, e);
                    } else {
                        debug!("Cached {}", request.url);
                    }
                }
                Ok(FetchOutcome::respond(response, ResponseSource::Network))
            }
            Err(e) if request.is_navigation() => {
                info!("Network failed for {} ({}), serving offline page", request.url, e);
                self.offline_fallback().await
            }
            Err(e) => Err(e),
        }
    }

    /// Looks up the offline document in the current store.
    async fn offline_fallback(&self) -> Result<FetchOutcome> {
        let url = self.settings.resolve(&self.settings.offline_url)?;
        let request = Request::get(url);

        match self.caches.lookup(self.cache_name(), &request).await? {
            Some(page) => Ok(FetchOutcome::respond(page, ResponseSource::OfflineFallback)),
            None => Err(WorkerError::OfflineFallbackMissing(request.url.to_string())),
        }
    }
}
