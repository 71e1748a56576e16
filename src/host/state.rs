//! Worker lifecycle states.

use serde::Serialize;

// == Worker State ==
/// Lifecycle of one worker version. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerState {
    /// Constructed, install not yet dispatched
    Parsed,
    Installing,
    Installed,
    Activating,
    /// Controls traffic
    Activated,
    /// Failed install or activation; never controls traffic
    Redundant,
}

impl WorkerState {
    /// Whether the host may move from `self` to `next`.
    pub fn can_transition_to(&self, next: WorkerState) -> bool {
        use WorkerState::*;

        matches!(
            (self, next),
            (Parsed, Installing)
                | (Installing, Installed)
                | (Installed, Activating)
                | (Activating, Activated)
                | (Installing | Installed | Activating | Activated, Redundant)
        )
    }

    /// Only an activated worker intercepts fetches and sync events.
    pub fn controls_traffic(&self) -> bool {
        matches!(self, WorkerState::Activated)
    }
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WorkerState::Parsed => "parsed",
            WorkerState::Installing => "installing",
            WorkerState::Installed => "installed",
            WorkerState::Activating => "activating",
            WorkerState::Activated => "activated",
            WorkerState::Redundant => "redundant",
        };
        f.write_str(name)
    }
}
