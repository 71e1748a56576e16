//! API Routes
//!
//! Configures the Axum router: admin endpoints under `/__worker`, every
//! other request handed to the worker as a fetch event.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{fetch_handler, health_handler, status_handler, sync_handler, AppState};

/// Path prefix reserved for the admin endpoints
pub const ADMIN_PREFIX: &str = "/__worker";

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /__worker/health` - Health check endpoint
/// - `GET /__worker/status` - Worker state and cache statistics
/// - `POST /__worker/sync/:tag` - Dispatch a background sync event
/// - anything else - Fetch event
///
/// # Middleware
/// - CORS: Allows any origin on the admin endpoints
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin = Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/sync/:tag", post(sync_handler))
        .layer(cors);

    Router::new()
        .nest(ADMIN_PREFIX, admin)
        .fallback(fetch_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
