//! Network Client
//!
//! The network primitive the worker fetches through, and its reqwest-backed
//! implementation.

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use tracing::debug;
use url::Url;

use crate::error::{Result, WorkerError};
use crate::net::{Request, Response, ResponseType};

/// Issues requests on behalf of the worker.
///
/// A returned `Err` means the request failed outright. HTTP error statuses are
/// successful fetches and come back as `Ok`.
#[async_trait]
pub trait Network: Send + Sync {
    async fn fetch(&self, request: &Request) -> Result<Response>;
}

/// Hop-by-hop headers that must not be forwarded upstream.
const HOP_BY_HOP: [header::HeaderName; 5] = [
    header::HOST,
    header::CONNECTION,
    header::TRANSFER_ENCODING,
    header::CONTENT_LENGTH,
    header::UPGRADE,
];

// == HTTP Network ==
/// Network primitive backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpNetwork {
    client: reqwest::Client,
    origin: Url,
}

impl HttpNetwork {
    /// Creates a client that classifies responses relative to `origin`.
    ///
    /// Redirects are not followed: a 3xx comes back as-is so it is never
    /// stored under the URL that was requested.
    pub fn new(origin: Url) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| WorkerError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, origin })
    }
}

#[async_trait]
impl Network for HttpNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response> {
        let mut headers = request.headers.clone();
        for name in HOP_BY_HOP {
            headers.remove(name);
        }

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(headers);
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let upstream = builder
            .send()
            .await
            .map_err(|e| WorkerError::Network(format!("{}: {}", request.url, e)))?;

        let status = upstream.status();
        let final_url = upstream.url().clone();
        let headers = upstream.headers().clone();
        let kind = classify(&self.origin, &final_url, &headers);

        let body = upstream
            .bytes()
            .await
            .map_err(|e| WorkerError::Network(format!("{}: {}", request.url, e)))?;

        debug!(
            "Fetched {} {} -> {} ({:?}, {} bytes)",
            request.method,
            request.url,
            status,
            kind,
            body.len()
        );

        Ok(Response::new(status, body.to_vec())
            .with_kind(kind)
            .with_headers(headers)
            .with_url(final_url))
    }
}

/// Classifies a response by where it was finally served from.
fn classify(origin: &Url, served_from: &Url, headers: &HeaderMap) -> ResponseType {
    if served_from.origin() == origin.origin() {
        ResponseType::Basic
    } else if headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN) {
        ResponseType::Cors
    } else {
        ResponseType::Opaque
    }
}
