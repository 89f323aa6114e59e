use serde::Serialize;

use crate::controller::host::HostEvent;
use crate::controller::session::{ActionMode, Phase};

// ============================================================================
// Replay report: one entry per key fed to the controller
// ============================================================================

/// What happened in response to a single key.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayStep {
    /// Key as written in the script
    pub key: String,

    /// Whether the controller let the event propagate
    pub propagated: bool,

    /// Phase after the key (and any elapsed interval) was handled
    pub phase: Phase,

    /// Host calls made while handling the key
    pub events: Vec<HostEvent>,
}

/// Full transcript of a replayed activation.
///
/// Built incrementally by the `replay` command and printed by the console
/// reporter.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub mode: ActionMode,

    /// Host calls made by the activation itself
    pub activation: Vec<HostEvent>,

    pub steps: Vec<ReplayStep>,

    /// Host calls made while the clock settled after the last key
    pub settle: Vec<HostEvent>,

    pub final_phase: Phase,

    /// Virtual time at the end of the replay
    pub elapsed_ms: u64,
}

impl ReplayReport {
    pub fn new(mode: ActionMode) -> Self {
        Self {
            mode,
            activation: vec![],
            steps: vec![],
            settle: vec![],
            final_phase: Phase::Inactive,
            elapsed_ms: 0,
        }
    }

    /// Every host event in order.
    pub fn all_events(&self) -> impl Iterator<Item = &HostEvent> {
        self.activation
            .iter()
            .chain(self.steps.iter().flat_map(|s| s.events.iter()))
            .chain(self.settle.iter())
    }
}
