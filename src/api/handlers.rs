//! API Handlers
//!
//! Admin endpoints plus the catch-all handler that turns live HTTP traffic
//! into fetch events.

use std::sync::Arc;

use axum::{
    body::to_bytes,
    extract::{Path, Request, State},
    http::request::Parts,
    Json,
};
use url::Url;

use crate::cache::{CacheStorage, MemoryStorage};
use crate::error::{Result, WorkerError};
use crate::host::ServiceHost;
use crate::models::{CacheStatus, HealthResponse, StatusResponse, SyncResponse};
use crate::net::{self, Destination};

/// Largest request body forwarded to the origin, in bytes
pub const MAX_BODY_SIZE: usize = 8 * 1024 * 1024;

/// Header carrying the request destination
const FETCH_DEST_HEADER: &str = "sec-fetch-dest";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Host running the worker
    pub host: Arc<ServiceHost>,
    /// Storage the worker's stores live in
    pub storage: Arc<MemoryStorage>,
}

impl AppState {
    /// Creates a new AppState.
    pub fn new(host: Arc<ServiceHost>, storage: Arc<MemoryStorage>) -> Self {
        Self { host, storage }
    }
}

/// Handler for GET /__worker/health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /__worker/status
///
/// Reports the worker version, lifecycle state and cache statistics.
pub async fn status_handler(State(state): State<AppState>) -> Result<Json<StatusResponse>> {
    let stats = state.storage.stats().await;
    let stores = state.storage.keys().await?;

    Ok(Json(StatusResponse {
        version: state.host.worker().cache_name().to_string(),
        state: state.host.state().await,
        skip_waiting: state.host.skip_waiting_requested(),
        clients_claimed: state.host.clients_claimed(),
        cache: CacheStatus::new(&stats, stores),
    }))
}

/// Handler for POST /__worker/sync/:tag
///
/// Dispatches a background sync event with the given tag.
pub async fn sync_handler(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<SyncResponse>> {
    let outcome = state.host.dispatch_sync(&tag).await?;
    Ok(Json(SyncResponse::new(tag, outcome)))
}

/// Fallback handler for every other request.
///
/// The request is resolved against the origin and dispatched as a fetch event.
pub async fn fetch_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<net::Response> {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, MAX_BODY_SIZE)
        .await
        .map_err(|e| WorkerError::InvalidRequest(format!("unreadable request body: {}", e)))?;

    let request = worker_request(&state.host.worker().settings().origin, parts, body.to_vec());
    state.host.dispatch_fetch(request).await
}

/// Builds the intercepted request for an incoming HTTP request.
///
/// Only path and query are taken from the incoming URI, so the request can
/// never leave the configured origin.
fn worker_request(origin: &Url, parts: Parts, body: Vec<u8>) -> net::Request {
    let mut url = origin.clone();
    url.set_path(parts.uri.path());
    url.set_query(parts.uri.query());

    let destination = parts
        .headers
        .get(FETCH_DEST_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(Destination::from_header)
        .unwrap_or_default();

    net::Request::new(parts.method, url)
        .with_destination(destination)
        .with_headers(parts.headers)
        .with_body(body)
}
