//! Offline Shell - cache-first offline worker for a web application shell
//!
//! Pre-caches the app shell on install, sweeps old cache versions on
//! activation, and serves traffic cache first with a network fallback and an
//! offline page for failed navigations.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod host;
pub mod models;
pub mod net;
pub mod worker;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, WorkerError};
pub use host::{HostControl, ServiceHost, WorkerState};
pub use worker::{OfflineWorker, WorkerSettings};
