use std::fmt;

use serde::Serialize;

use crate::dom::dom_model::{NodeId, Rect};
use crate::hints::render::RenderedMarker;

pub type HandlerId = u64;

/// Modifier keys attached to a simulated click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClickModifiers {
    pub ctrl: bool,
    pub meta: bool,
}

// ============================================================================
// Collaborators
// ============================================================================

/// Page-wide modal key dispatch. While a frame is on the stack, hint mode
/// receives every key event.
pub trait HandlerStack {
    fn push_handler(&mut self, name: &str) -> HandlerId;
    fn pop_handler(&mut self, id: HandlerId);
}

/// The heads-up display used for status text.
pub trait StatusDisplay {
    fn show_status(&mut self, text: &str);
    fn hide_status(&mut self);
}

/// Marker container inserted into the page.
pub trait MarkerOverlay {
    fn show_markers(&mut self, markers: &[RenderedMarker]);
    fn update_markers(&mut self, markers: &[RenderedMarker]);
    fn remove_markers(&mut self);
    fn flash(&mut self, rect: Rect);
}

/// Side effects run once a marker is resolved.
pub trait ActionExecutor {
    fn simulate_click(&mut self, node: NodeId, modifiers: ClickModifiers);
    fn simulate_select(&mut self, node: NodeId);
    fn focus(&mut self, node: NodeId);
    fn copy_to_clipboard(&mut self, text: &str);
}

/// Everything the controller needs from the page around it.
pub trait Host: HandlerStack + StatusDisplay + MarkerOverlay + ActionExecutor {}

impl<T: HandlerStack + StatusDisplay + MarkerOverlay + ActionExecutor> Host for T {}

// ============================================================================
// Recording host
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HostEvent {
    PushHandler(HandlerId),
    PopHandler(HandlerId),
    ShowStatus(String),
    HideStatus,
    ShowMarkers(Vec<String>),
    UpdateMarkers(Vec<String>),
    RemoveMarkers,
    Flash(Rect),
    Click { node: NodeId, modifiers: ClickModifiers },
    Select(NodeId),
    Focus(NodeId),
    Copy(String),
}

impl fmt::Display for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostEvent::PushHandler(id) => write!(f, "push handler #{}", id),
            HostEvent::PopHandler(id) => write!(f, "pop handler #{}", id),
            HostEvent::ShowStatus(text) => write!(f, "status \"{}\"", text),
            HostEvent::HideStatus => write!(f, "status hidden"),
            HostEvent::ShowMarkers(labels) => write!(f, "show markers [{}]", labels.join(", ")),
            HostEvent::UpdateMarkers(labels) => write!(f, "update markers [{}]", labels.join(", ")),
            HostEvent::RemoveMarkers => write!(f, "remove markers"),
            HostEvent::Flash(rect) => write!(
                f,
                "flash {}x{} at ({}, {})",
                rect.width, rect.height, rect.left, rect.top
            ),
            HostEvent::Click { node, modifiers } => {
                write!(f, "click node {}", node)?;
                if modifiers.ctrl {
                    write!(f, " +ctrl")?;
                }
                if modifiers.meta {
                    write!(f, " +meta")?;
                }
                Ok(())
            }
            HostEvent::Select(node) => write!(f, "select node {}", node),
            HostEvent::Focus(node) => write!(f, "focus node {}", node),
            HostEvent::Copy(text) => write!(f, "copy \"{}\"", text),
        }
    }
}

/// A host that records every call instead of touching a real page. Used by
/// the `replay` command and by tests.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
    /// Currently displayed markers
    pub markers: Vec<RenderedMarker>,
    pub status: Option<String>,
    stack: Vec<HandlerId>,
    next_handler: HandlerId,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handler_depth(&self) -> usize {
        self.stack.len()
    }

    /// Text of the markers currently shown, in scan order.
    pub fn visible_labels(&self) -> Vec<String> {
        self.markers
            .iter()
            .filter(|m| m.visible)
            .map(RenderedMarker::text)
            .collect()
    }

    pub fn clicks(&self) -> Vec<(NodeId, ClickModifiers)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Click { node, modifiers } => Some((*node, *modifiers)),
                _ => None,
            })
            .collect()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

fn visible_texts(markers: &[RenderedMarker]) -> Vec<String> {
    markers
        .iter()
        .filter(|m| m.visible)
        .map(RenderedMarker::text)
        .collect()
}

impl HandlerStack for RecordingHost {
    fn push_handler(&mut self, _name: &str) -> HandlerId {
        self.next_handler += 1;
        let id = self.next_handler;
        self.stack.push(id);
        self.events.push(HostEvent::PushHandler(id));
        id
    }

    fn pop_handler(&mut self, id: HandlerId) {
        self.stack.retain(|&h| h != id);
        self.events.push(HostEvent::PopHandler(id));
    }
}

impl StatusDisplay for RecordingHost {
    fn show_status(&mut self, text: &str) {
        self.status = Some(text.to_string());
        self.events.push(HostEvent::ShowStatus(text.to_string()));
    }

    fn hide_status(&mut self) {
        self.status = None;
        self.events.push(HostEvent::HideStatus);
    }
}

impl MarkerOverlay for RecordingHost {
    fn show_markers(&mut self, markers: &[RenderedMarker]) {
        self.markers = markers.to_vec();
        self.events.push(HostEvent::ShowMarkers(visible_texts(markers)));
    }

    fn update_markers(&mut self, markers: &[RenderedMarker]) {
        self.markers = markers.to_vec();
        self.events.push(HostEvent::UpdateMarkers(visible_texts(markers)));
    }

    fn remove_markers(&mut self) {
        self.markers.clear();
        self.events.push(HostEvent::RemoveMarkers);
    }

    fn flash(&mut self, rect: Rect) {
        self.events.push(HostEvent::Flash(rect));
    }
}

impl ActionExecutor for RecordingHost {
    fn simulate_click(&mut self, node: NodeId, modifiers: ClickModifiers) {
        self.events.push(HostEvent::Click { node, modifiers });
    }

    fn simulate_select(&mut self, node: NodeId) {
        self.events.push(HostEvent::Select(node));
    }

    fn focus(&mut self, node: NodeId) {
        self.events.push(HostEvent::Focus(node));
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        self.events.push(HostEvent::Copy(text.to_string()));
    }
}
