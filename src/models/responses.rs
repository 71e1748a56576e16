//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing admin response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::host::WorkerState;
use crate::worker::SyncOutcome;

/// Response body for the health endpoint (GET /__worker/health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Cache section of the status endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
    /// Stores opened, including implicit creates
    pub opens: u64,
    /// Stores deleted
    pub deletions: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Names of every store currently present
    pub stores: Vec<String>,
}

impl CacheStatus {
    pub fn new(stats: &CacheStats, stores: Vec<String>) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            writes: stats.writes,
            opens: stats.opens,
            deletions: stats.deletions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            stores,
        }
    }
}

/// Response body for the status endpoint (GET /__worker/status)
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Current cache version tag
    pub version: String,
    /// Worker lifecycle state
    pub state: WorkerState,
    pub skip_waiting: bool,
    pub clients_claimed: bool,
    pub cache: CacheStatus,
}

/// Response body for the sync endpoint (POST /__worker/sync/:tag)
#[derive(Debug, Clone, Serialize)]
pub struct SyncResponse {
    pub tag: String,
    /// Whether a handler ran for the tag
    pub handled: bool,
}

impl SyncResponse {
    pub fn new(tag: impl Into<String>, outcome: SyncOutcome) -> Self {
        Self {
            tag: tag.into(),
            handled: outcome == SyncOutcome::Completed,
        }
    }
}
