//! Request Module
//!
//! Defines intercepted requests and the identity they are cached under.

use axum::http::{HeaderMap, Method};
use url::Url;

// == Destination ==
/// What the request is fetching, as reported by `Sec-Fetch-Dest`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Destination {
    /// Full-page navigation
    Document,
    Script,
    Style,
    Image,
    Font,
    Manifest,
    /// fetch()/XHR calls and anything without a destination
    #[default]
    Empty,
    Other(String),
}

impl Destination {
    /// Parses a `Sec-Fetch-Dest` header value.
    pub fn from_header(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "document" => Destination::Document,
            "script" => Destination::Script,
            "style" => Destination::Style,
            "image" => Destination::Image,
            "font" => Destination::Font,
            "manifest" => Destination::Manifest,
            "" | "empty" => Destination::Empty,
            other => Destination::Other(other.to_string()),
        }
    }

    /// True for full document loads.
    pub fn is_navigation(&self) -> bool {
        matches!(self, Destination::Document)
    }
}

// == Request Key ==
/// Identity of a request inside a cache store: method plus URL without fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    pub method: Method,
    pub url: String,
}

// == Request ==
/// A request intercepted by the worker.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub destination: Destination,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Request {
    // == Constructors ==
    /// Creates a request with the given method and no headers or body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            destination: Destination::Empty,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a plain GET request.
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Sets the request destination.
    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    /// Replaces the request headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Replaces the request body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    // == Key ==
    /// Returns the identity this request is stored under.
    pub fn key(&self) -> RequestKey {
        let mut url = self.url.clone();
        url.set_fragment(None);
        RequestKey {
            method: self.method.clone(),
            url: url.into(),
        }
    }

    /// True for full document loads.
    pub fn is_navigation(&self) -> bool {
        self.destination.is_navigation()
    }
}
