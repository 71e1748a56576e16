//! Host Module
//!
//! The environment a worker version runs in: it dispatches lifecycle and
//! fetch events in order, enforces the state machine, and performs
//! passthrough requests natively.

mod state;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::error::{Result, WorkerError};
use crate::net::{Network, Request, Response};
use crate::worker::{FetchOutcome, OfflineWorker, SyncOutcome};

pub use state::WorkerState;

/// Control primitives a worker can invoke on its host.
#[async_trait]
pub trait HostControl: Send + Sync {
    /// Proceed to activation without waiting for older workers' clients.
    async fn skip_waiting(&self) -> Result<()>;

    /// Take control of already open clients immediately.
    async fn claim_clients(&self) -> Result<()>;
}

// == Service Host ==
/// Runs one worker version and routes traffic through it once activated.
pub struct ServiceHost {
    worker: OfflineWorker,
    network: Arc<dyn Network>,
    state: RwLock<WorkerState>,
    skip_waiting: AtomicBool,
    clients_claimed: AtomicBool,
}

impl ServiceHost {
    /// Creates a host for `worker`. `network` serves passthrough requests.
    pub fn new(worker: OfflineWorker, network: Arc<dyn Network>) -> Self {
        Self {
            worker,
            network,
            state: RwLock::new(WorkerState::Parsed),
            skip_waiting: AtomicBool::new(false),
            clients_claimed: AtomicBool::new(false),
        }
    }

    pub fn worker(&self) -> &OfflineWorker {
        &self.worker
    }

    pub async fn state(&self) -> WorkerState {
        *self.state.read().await
    }

    pub fn skip_waiting_requested(&self) -> bool {
        self.skip_waiting.load(Ordering::SeqCst)
    }

    pub fn clients_claimed(&self) -> bool {
        self.clients_claimed.load(Ordering::SeqCst)
    }

    async fn transition(&self, next: WorkerState) -> Result<()> {
        let mut state = self.state.write().await;
        if !state.can_transition_to(next) {
            return Err(WorkerError::InvalidState(format!(
                "cannot move worker from {} to {}",
                *state, next
            )));
        }
        debug!("Worker state {} -> {}", *state, next);
        *state = next;
        Ok(())
    }

    // == Lifecycle ==
    /// Dispatches the install event and waits for it to settle.
    pub async fn install(&self) -> Result<()> {
        self.transition(WorkerState::Installing).await?;

        match self.worker.install(self).await {
            Ok(()) => self.transition(WorkerState::Installed).await,
            Err(e) => {
                error!("Install failed: {}", e);
                self.transition(WorkerState::Redundant).await?;
                Err(e)
            }
        }
    }

    /// Dispatches the activate event and waits for it to settle.
    pub async fn activate(&self) -> Result<()> {
        self.transition(WorkerState::Activating).await?;

        match self.worker.activate(self).await {
            Ok(()) => self.transition(WorkerState::Activated).await,
            Err(e) => {
                error!("Activation failed: {}", e);
                self.transition(WorkerState::Redundant).await?;
                Err(e)
            }
        }
    }

    /// Installs then activates the worker.
    pub async fn start(&self) -> Result<()> {
        self.install().await?;
        if !self.skip_waiting_requested() {
            info!("Worker installed without skip_waiting; activating as the only worker");
        }
        self.activate().await
    }

    // == Events ==
    /// Routes one request: through the worker when it controls traffic,
    /// natively otherwise.
    pub async fn dispatch_fetch(&self, request: Request) -> Result<Response> {
        if !self.state().await.controls_traffic() {
            return self.network.fetch(&request).await;
        }

        match self.worker.fetch(&request).await? {
            FetchOutcome::Respond { response, source } => {
                debug!("{} answered from {:?}", request.url, source);
                Ok(response)
            }
            FetchOutcome::Passthrough => self.network.fetch(&request).await,
        }
    }

    /// Dispatches a sync event to the activated worker.
    pub async fn dispatch_sync(&self, tag: &str) -> Result<SyncOutcome> {
        let state = self.state().await;
        if !state.controls_traffic() {
            return Err(WorkerError::InvalidState(format!(
                "sync requires an activated worker, current state is {}",
                state
            )));
        }
        self.worker.sync(tag).await
    }
}

#[async_trait]
impl HostControl for ServiceHost {
    async fn skip_waiting(&self) -> Result<()> {
        self.skip_waiting.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn claim_clients(&self) -> Result<()> {
        self.clients_claimed.store(true, Ordering::SeqCst);
        info!("Worker now controls open clients");
        Ok(())
    }
}
