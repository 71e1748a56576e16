//! Cache Store Module
//!
//! A single named store mapping request identities to captured responses.

use std::collections::HashMap;

use axum::http::Method;

use crate::cache::CacheEntry;
use crate::error::{Result, WorkerError};
use crate::net::{Request, RequestKey, Response};

// == Cache Store ==
/// One versioned store of captured responses.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Request identity to stored response
    entries: HashMap<RequestKey, CacheEntry>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Put ==
    /// Stores a response under the request's identity, replacing any previous entry.
    ///
    /// Only GET requests can be stored.
    pub fn put(&mut self, request: &Request, response: Response) -> Result<()> {
        if request.method != Method::GET {
            return Err(WorkerError::InvalidRequest(format!(
                "cannot store a {} request: {}",
                request.method, request.url
            )));
        }

        self.entries.insert(request.key(), CacheEntry::new(response));
        Ok(())
    }

    // == Get ==
    /// Returns a copy of the stored response for the request, if any.
    ///
    /// Non-GET requests never match.
    pub fn get(&self, request: &Request) -> Option<Response> {
        if request.method != Method::GET {
            return None;
        }

        self.entries
            .get(&request.key())
            .map(CacheEntry::to_response)
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
