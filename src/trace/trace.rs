use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::controller::session::{ActionMode, Phase};
use crate::hints::hint_model::Key;

/// One controller decision, written as a JSON line.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub step: u64,

    pub phase: String,
    pub mode: Option<ActionMode>,

    pub key: Option<String>,
    pub decision: Option<String>,

    pub matched: Option<usize>,
    pub delay_ms: Option<u64>,
}

impl TraceEvent {
    pub fn now(step: u64, phase: Phase) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            step,
            phase: phase.to_string(),
            mode: None,
            key: None,
            decision: None,
            matched: None,
            delay_ms: None,
        }
    }

    pub fn with_mode(mut self, mode: ActionMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_key(mut self, key: &Key) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn with_decision(mut self, decision: impl ToString) -> Self {
        self.decision = Some(decision.to_string());
        self
    }

    pub fn with_matched(mut self, matched: usize) -> Self {
        self.matched = Some(matched);
        self
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }
}
