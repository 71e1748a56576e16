//! Response models for the admin API
//!
//! DTOs serialized by the `/__worker` endpoints.

pub mod responses;

// Re-export commonly used types
pub use responses::{CacheStatus, HealthResponse, StatusResponse, SyncResponse};
