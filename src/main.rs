//! Offline Shell - cache-first offline worker for a web application shell
//!
//! Runs the worker in front of an origin: the app shell is pre-cached at
//! startup and every request is served cache first.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use offline_shell::api::{create_router, AppState};
use offline_shell::cache::MemoryStorage;
use offline_shell::config::Config;
use offline_shell::host::ServiceHost;
use offline_shell::net::HttpNetwork;
use offline_shell::worker::OfflineWorker;

/// Main entry point for the offline shell host.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create network client, cache storage, worker and host
/// 4. Install and activate the worker
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "offline_shell=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Offline Shell");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: origin={}, cache_version={}, precache={} assets, port={}",
        config.origin_url,
        config.cache_version,
        config.precache_urls.len(),
        config.server_port
    );

    let settings = config
        .worker_settings()
        .context("invalid worker configuration")?;
    let network = Arc::new(
        HttpNetwork::new(settings.origin.clone()).context("failed to create network client")?,
    );
    let storage = Arc::new(MemoryStorage::new());
    let worker = OfflineWorker::new(settings, storage.clone(), network.clone());
    let host = Arc::new(ServiceHost::new(worker, network));

    // A worker that fails to start leaves traffic untouched
    match host.start().await {
        Ok(()) => info!("Worker activated"),
        Err(e) => error!("Worker not activated, serving passthrough only: {}", e),
    }

    let app = create_router(AppState::new(host, storage));

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
