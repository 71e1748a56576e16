//! Cache Entry Module
//!
//! Defines the stored form of a captured response.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{header, HeaderMap, StatusCode};
use url::Url;

use crate::net::{Body, Response, ResponseType};

// == Cache Entry ==
/// A response as persisted in a cache store.
#[derive(Debug)]
pub struct CacheEntry {
    pub status: StatusCode,
    pub kind: ResponseType,
    pub headers: HeaderMap,
    pub url: Option<Url>,
    /// Stored body; handed out only as copies
    body: Body,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Captures a response, taking ownership of its body.
    ///
    /// `Set-Cookie` is never stored; replayed entries carry no session state.
    pub fn new(response: Response) -> Self {
        let status = response.status;
        let kind = response.kind;
        let mut headers = response.headers.clone();
        headers.remove(header::SET_COOKIE);
        let url = response.url.clone();

        Self {
            status,
            kind,
            headers,
            url,
            body: response.into_body(),
            created_at: current_timestamp_ms(),
        }
    }

    // == To Response ==
    /// Rebuilds a response from the entry with a copied body.
    pub fn to_response(&self) -> Response {
        let response = Response::new(self.status, self.body.copy().into_bytes())
            .with_kind(self.kind)
            .with_headers(self.headers.clone());

        match &self.url {
            Some(url) => response.with_url(url.clone()),
            None => response,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
