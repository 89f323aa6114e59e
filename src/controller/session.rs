use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::controller::host::HandlerId;
use crate::controller::scheduler::TaskHandle;
use crate::error::HintError;
use crate::hints::hint_model::{HintLabeler, HintMarker};

/// What happens to the element the user selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionMode {
    CurrentTab,
    NewTab,
    /// Open in a new tab and immediately hint again
    Queued,
    CopyUrl,
}

impl ActionMode {
    pub fn status_text(&self) -> &'static str {
        match self {
            ActionMode::CurrentTab => "Open link in current tab",
            ActionMode::NewTab => "Open link in new tab",
            ActionMode::Queued => "Open multiple links in a new tab",
            ActionMode::CopyUrl => "Copy link URL to Clipboard",
        }
    }

    /// Holding shift swaps current-tab and new-tab intent.
    pub fn toggled(self) -> Self {
        match self {
            ActionMode::CurrentTab => ActionMode::NewTab,
            ActionMode::NewTab => ActionMode::CurrentTab,
            other => other,
        }
    }

    pub fn can_toggle(&self) -> bool {
        matches!(self, ActionMode::CurrentTab | ActionMode::NewTab)
    }
}

impl FromStr for ActionMode {
    type Err = HintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "current" | "current-tab" => Ok(ActionMode::CurrentTab),
            "new-tab" | "newtab" => Ok(ActionMode::NewTab),
            "queue" | "queued" => Ok(ActionMode::Queued),
            "copy" | "copy-url" => Ok(ActionMode::CopyUrl),
            _ => Err(HintError::UnknownActionMode(s.to_string())),
        }
    }
}

/// Controller lifecycle phase. `Building` only exists while an activation
/// is being set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Inactive,
    Building,
    Active,
    Delaying,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Inactive => "inactive",
            Phase::Building => "building",
            Phase::Active => "active",
            Phase::Delaying => "delaying",
        };
        write!(f, "{}", name)
    }
}

/// Everything owned by one live hinting episode.
pub struct ActiveSession {
    pub markers: Vec<HintMarker>,
    pub labeler: Box<dyn HintLabeler>,
    pub mode: ActionMode,
    pub shift_held: bool,
    pub handler: HandlerId,
}

impl ActiveSession {
    pub fn effective_mode(&self) -> ActionMode {
        if self.shift_held {
            self.mode.toggled()
        } else {
            self.mode
        }
    }
}

/// A session whose selection is resolved and waiting for its delay to
/// elapse. Keys are not routed anywhere in this state.
pub struct DelayingSession {
    pub session: ActiveSession,
    pub resolved: HintMarker,
    pub mode: ActionMode,
    pub task: TaskHandle,
}

pub enum Session {
    Inactive,
    Active(ActiveSession),
    Delaying(DelayingSession),
}

impl Session {
    pub fn phase(&self) -> Phase {
        match self {
            Session::Inactive => Phase::Inactive,
            Session::Active(_) => Phase::Active,
            Session::Delaying(_) => Phase::Delaying,
        }
    }
}
