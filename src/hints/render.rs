use serde::Serialize;

use crate::dom::dom_model::{NodeId, Viewport};
use crate::hints::hint_model::{HintLabeler, HintMarker};

/// One displayed character of a marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintSpan {
    pub ch: char,
    /// Already typed by the user
    pub matched: bool,
}

/// What the overlay draws for one marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedMarker {
    pub node: NodeId,
    pub left: f64,
    pub top: f64,
    pub visible: bool,
    pub spans: Vec<HintSpan>,
}

impl RenderedMarker {
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.ch).collect()
    }
}

/// Markers are positioned in document coordinates, so the scroll offset is
/// added to the viewport-relative rect.
pub fn render_marker(
    marker: &HintMarker,
    labeler: &dyn HintLabeler,
    typed: usize,
    viewport: &Viewport,
) -> RenderedMarker {
    let spans = labeler
        .display_text(marker)
        .chars()
        .enumerate()
        .map(|(i, ch)| HintSpan { ch, matched: i < typed })
        .collect();

    RenderedMarker {
        node: marker.element.node,
        left: marker.element.rect.left + viewport.scroll_x,
        top: marker.element.rect.top + viewport.scroll_y,
        visible: marker.visible,
        spans,
    }
}

pub fn render_markers(
    markers: &[HintMarker],
    labeler: &dyn HintLabeler,
    viewport: &Viewport,
) -> Vec<RenderedMarker> {
    let typed = labeler.typed_len();
    markers
        .iter()
        .map(|m| render_marker(m, labeler, typed, viewport))
        .collect()
}
