//! API Module
//!
//! HTTP surface of the host: admin endpoints and fetch dispatch.
//!
//! # Endpoints
//! - `GET /__worker/health` - Health check endpoint
//! - `GET /__worker/status` - Worker state and cache statistics
//! - `POST /__worker/sync/:tag` - Dispatch a background sync event
//! - everything else - Served through the worker

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, ADMIN_PREFIX};
