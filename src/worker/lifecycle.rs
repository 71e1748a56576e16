//! Install and activate hooks.

use futures::future::join_all;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::host::HostControl;
use crate::net::Request;
use crate::worker::OfflineWorker;

impl OfflineWorker {
    // == Install ==
    /// Opens the current store and fills it with the asset manifest.
    ///
    /// Population is all-or-nothing: any asset failing to fetch fails the
    /// whole install and nothing from this attempt is stored. On success the
    /// host is asked to skip waiting.
    pub async fn install(&self, host: &dyn HostControl) -> Result<()> {
        let name = self.cache_name();
        info!("Installing worker for cache '{}'", name);

        self.caches.open(name).await?;

        let requests = self
            .settings
            .precache
            .iter()
            .map(|path| self.settings.resolve(path).map(Request::get))
            .collect::<Result<Vec<_>>>()?;

        info!("Caching app shell ({} assets)", requests.len());
        self.caches
            .add_all(name, requests, self.network.as_ref())
            .await?;

        info!("Installation complete");
        host.skip_waiting().await
    }

    // == Activate ==
    /// Deletes every store whose name is not the current version tag.
    ///
    /// Deletions run concurrently and all of them settle before this returns.
    /// A store that was already gone is only logged; a deletion that errors
    /// fails activation. On success the host is asked to claim clients.
    pub async fn activate(&self, host: &dyn HostControl) -> Result<()> {
        let current = self.cache_name();
        info!("Activating worker for cache '{}'", current);

        let stale: Vec<String> = self
            .caches
            .keys()
            .await?
            .into_iter()
            .filter(|name| name != current)
            .collect();

        let deletions = stale.iter().map(|name| async move {
            info!("Removing old cache '{}'", name);
            (name, self.caches.delete(name).await)
        });

        let mut failure = None;
        for (name, result) in join_all(deletions).await {
            match result {
                Ok(true) => {}
                Ok(false) => warn!("Old cache '{}' was already gone", name),
                Err(e) => {
                    error!("Failed to remove old cache '{}': {}", name, e);
                    if failure.is_none() {
                        failure = Some(e);
                    }
                }
            }
        }
        if let Some(e) = failure {
            return Err(e);
        }

        info!("Activation complete");
        host.claim_clients().await
    }
}
