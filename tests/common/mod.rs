//! Shared fakes for the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::{header, HeaderMap, StatusCode};
use url::Url;

use offline_shell::net::{Network, Request, Response, ResponseType};
use offline_shell::{Result, WorkerError, WorkerSettings};

pub const ORIGIN: &str = "http://app.test/";

/// Origin fake: serves a fixed set of pages, can be switched offline, and
/// counts every fetch it receives.
#[derive(Default)]
pub struct FakeOrigin {
    pages: Mutex<HashMap<String, (StatusCode, ResponseType, Vec<u8>)>>,
    redirects: Mutex<HashMap<String, String>>,
    sessions: Mutex<HashSet<String>>,
    offline: AtomicBool,
    calls: AtomicUsize,
}

impl FakeOrigin {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// An origin serving the default app shell.
    pub fn with_shell() -> Arc<Self> {
        let origin = Self::new();
        origin.serve("/", "<html>shell</html>");
        origin.serve("/fahrschul.html", "<html>app</html>");
        origin.serve("/manifest.json", "{\"name\":\"app\"}");
        origin.serve("/offline.html", "<html>offline</html>");
        origin
    }

    pub fn serve(&self, path: &str, body: &str) {
        self.serve_as(path, StatusCode::OK, ResponseType::Basic, body);
    }

    pub fn serve_as(&self, path: &str, status: StatusCode, kind: ResponseType, body: &str) {
        self.pages
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, kind, body.as_bytes().to_vec()));
    }

    /// Answers `path` with a 302 pointing at `location`.
    pub fn redirect(&self, path: &str, location: &str) {
        self.redirects
            .lock()
            .unwrap()
            .insert(path.to_string(), location.to_string());
    }

    /// Answers `path` with a page personalised by the request's `Cookie`
    /// header, echoed back in `Set-Cookie`.
    pub fn serve_session(&self, path: &str) {
        self.sessions.lock().unwrap().insert(path.to_string());
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Network for FakeOrigin {
    async fn fetch(&self, request: &Request) -> Result<Response> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(WorkerError::Network(format!("{}: offline", request.url)));
        }

        let path = request.url.path();
        if let Some(location) = self.redirects.lock().unwrap().get(path) {
            let mut headers = HeaderMap::new();
            headers.insert(header::LOCATION, location.parse().unwrap());
            return Ok(Response::new(StatusCode::FOUND, Vec::new())
                .with_headers(headers)
                .with_url(request.url.clone()));
        }

        if self.sessions.lock().unwrap().contains(path) {
            let cookie = request
                .headers
                .get(header::COOKIE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let mut headers = HeaderMap::new();
            if !cookie.is_empty() {
                let set_cookie = format!("session={}", cookie);
                headers.insert(header::SET_COOKIE, set_cookie.parse().unwrap());
            }
            return Ok(Response::new(StatusCode::OK, format!("hello {}", cookie))
                .with_headers(headers)
                .with_url(request.url.clone()));
        }

        let pages = self.pages.lock().unwrap();
        match pages.get(path) {
            Some((status, kind, body)) => Ok(Response::new(*status, body.clone())
                .with_kind(*kind)
                .with_url(request.url.clone())),
            None => Ok(Response::new(StatusCode::NOT_FOUND, "not found")),
        }
    }
}

pub fn settings(version: &str) -> WorkerSettings {
    WorkerSettings {
        cache_name: version.to_string(),
        origin: Url::parse(ORIGIN).unwrap(),
        precache: vec![
            "/".to_string(),
            "/fahrschul.html".to_string(),
            "/manifest.json".to_string(),
            "/offline.html".to_string(),
        ],
        offline_url: "/offline.html".to_string(),
    }
}

pub fn url(path: &str) -> Url {
    Url::parse(ORIGIN).unwrap().join(path).unwrap()
}
