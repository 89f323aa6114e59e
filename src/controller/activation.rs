use crate::cli::config::{HintSettings, Platform};
use crate::controller::host::{ClickModifiers, Host};
use crate::controller::session::ActionMode;
use crate::dom::dom_model::{DocumentSource, NodeId};
use crate::hints::hint_model::HintMarker;
use crate::scanner::clickable::{is_selectable, wants_focus};

/// A click the controller has to run later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredClick {
    pub node: NodeId,
    pub modifiers: ClickModifiers,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkActivation {
    /// Text field got the caret; nothing was clicked
    Selected,
    /// The action ran in full
    Activated,
    /// Target is focused, the click is still to come
    ClickPending(DeferredClick),
}

/// Modifier that makes a click open in a new tab.
pub fn new_tab_modifiers(platform: Platform) -> ClickModifiers {
    match platform {
        Platform::Mac => ClickModifiers { ctrl: false, meta: true },
        Platform::Other => ClickModifiers { ctrl: true, meta: false },
    }
}

/// Run the side effects of selecting `marker` under `mode`.
pub fn activate_link(
    doc: &dyn DocumentSource,
    marker: &HintMarker,
    mode: ActionMode,
    settings: &HintSettings,
    host: &mut dyn Host,
) -> LinkActivation {
    let id = marker.element.node;
    let node = doc.node(id);

    if node.map(is_selectable).unwrap_or(false) {
        host.simulate_select(id);
        return LinkActivation::Selected;
    }

    let focused = node.map(wants_focus).unwrap_or(false);
    if focused {
        host.focus(id);
    }
    host.flash(marker.element.rect);

    match mode {
        ActionMode::CurrentTab => {
            // Give the user a moment to see which element got picked.
            if !focused {
                host.focus(id);
            }
            LinkActivation::ClickPending(DeferredClick {
                node: id,
                modifiers: ClickModifiers::default(),
                delay_ms: settings.current_tab_click_delay_ms,
            })
        }
        ActionMode::NewTab => {
            host.simulate_click(id, new_tab_modifiers(settings.platform));
            if !focused {
                host.focus(id);
            }
            LinkActivation::Activated
        }
        ActionMode::Queued => {
            host.simulate_click(id, new_tab_modifiers(settings.platform));
            LinkActivation::Activated
        }
        ActionMode::CopyUrl => {
            if let Some(href) = node.and_then(|n| n.attr("href")) {
                host.copy_to_clipboard(href);
            }
            LinkActivation::Activated
        }
    }
}
