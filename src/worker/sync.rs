//! Background sync hook.

use tracing::{debug, info};

use crate::error::Result;
use crate::worker::OfflineWorker;

/// Tag of the sync registration this worker answers.
pub const BACKGROUND_SYNC_TAG: &str = "background-sync";

/// Result of a sync event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The tag was recognised and its work settled
    Completed,
    /// Unknown tag, nothing ran
    Ignored,
}

impl OfflineWorker {
    // == Sync ==
    /// Handles a background sync event.
    pub async fn sync(&self, tag: &str) -> Result<SyncOutcome> {
        info!("Background sync: {}", tag);

        if tag != BACKGROUND_SYNC_TAG {
            debug!("No handler for sync tag '{}'", tag);
            return Ok(SyncOutcome::Ignored);
        }

        self.background_sync().await?;
        Ok(SyncOutcome::Completed)
    }

    /// Reserved for deferred synchronization with a backend.
    ///
    /// Performs no network or cache activity and resolves immediately.
    async fn background_sync(&self) -> Result<()> {
        Ok(())
    }
}
