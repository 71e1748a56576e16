//! Error types for the offline worker
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Worker Error Enum ==
/// Unified error type for the worker, its storage and its host.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// The network request failed outright (no connectivity, DNS, refused)
    #[error("Network error: {0}")]
    Network(String),

    /// A manifest asset could not be fetched or stored during install
    #[error("Install failed: {0}")]
    Install(String),

    /// The cache storage primitive failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Navigation failed and the offline document is not in the store
    #[error("Offline fallback missing: {0}")]
    OfflineFallbackMissing(String),

    /// Lifecycle transition not allowed from the current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Configuration could not be resolved
    #[error("Configuration error: {0}")]
    Config(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for WorkerError {
    fn into_response(self) -> Response {
        let status = match &self {
            WorkerError::Network(_) => StatusCode::BAD_GATEWAY,
            WorkerError::OfflineFallbackMissing(_) => StatusCode::SERVICE_UNAVAILABLE,
            WorkerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            WorkerError::InvalidState(_) => StatusCode::CONFLICT,
            WorkerError::Install(_) | WorkerError::Storage(_) | WorkerError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the worker.
pub type Result<T> = std::result::Result<T, WorkerError>;
