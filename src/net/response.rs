//! Response Module
//!
//! Captured responses with a move-only body.

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use url::Url;

// == Response Type ==
/// Visibility class of a response, as seen from the worker's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    /// Same-origin, fully readable
    Basic,
    /// Cross-origin, readable through CORS
    Cors,
    /// Cross-origin without CORS; status and body are not meant to be inspected
    Opaque,
}

// == Body ==
/// Owned response body. It can be consumed once; copies are explicit.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Body(Vec<u8>);

impl Body {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Copies the bytes into a second, independent body.
    pub fn copy(&self) -> Self {
        Self(self.0.clone())
    }
}

// == Response ==
/// A response captured from the network or the cache.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub kind: ResponseType,
    pub headers: HeaderMap,
    /// Final URL the response was served from, if known
    pub url: Option<Url>,
    body: Body,
}

impl Response {
    // == Constructor ==
    /// Creates a same-origin response with the given status and body.
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            kind: ResponseType::Basic,
            headers: HeaderMap::new(),
            url: None,
            body: Body::new(body),
        }
    }

    /// Sets the response type.
    pub fn with_kind(mut self, kind: ResponseType) -> Self {
        self.kind = kind;
        self
    }

    /// Replaces the response headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the URL the response came from.
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    // == Body Access ==
    pub fn body(&self) -> &[u8] {
        self.body.as_bytes()
    }

    pub fn into_body(self) -> Body {
        self.body
    }

    // == Duplicate ==
    /// Produces an independent copy, including a copied body.
    ///
    /// One copy can be persisted while the other is handed to the caller.
    pub fn duplicate(&self) -> Self {
        Self {
            status: self.status,
            kind: self.kind,
            headers: self.headers.clone(),
            url: self.url.clone(),
            body: self.body.copy(),
        }
    }

    // == Classification ==
    /// True for 2xx statuses.
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    /// True when live traffic may write this response to the store:
    /// exactly 200, same-origin, and free of per-user state.
    ///
    /// The store is shared by every client of the host, so responses that
    /// set cookies or are marked `private`/`no-store` are never written.
    pub fn is_cacheable(&self) -> bool {
        self.status == StatusCode::OK
            && self.kind == ResponseType::Basic
            && !self.headers.contains_key(header::SET_COOKIE)
            && !self.forbids_shared_storage()
    }

    /// True when `Cache-Control` carries `private` or `no-store`.
    fn forbids_shared_storage(&self) -> bool {
        self.headers
            .get_all(header::CACHE_CONTROL)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .map(|directive| directive.trim().split('=').next().unwrap_or_default())
            .any(|name| {
                name.eq_ignore_ascii_case("private") || name.eq_ignore_ascii_case("no-store")
            })
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        let mut headers = self.headers;
        // Framing is recomputed by the server for the buffered body
        headers.remove(header::CONTENT_LENGTH);
        headers.remove(header::TRANSFER_ENCODING);
        headers.remove(header::CONNECTION);

        (self.status, headers, self.body.into_bytes()).into_response()
    }
}
