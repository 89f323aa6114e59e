use crate::dom::dom_model::{ComputedStyle, Rect, Viewport};

/// Rectangles closer than this to the right or bottom edge are off screen.
pub const EDGE_MARGIN: f64 = 4.0;

/// Anything smaller than this in either dimension is too small to hint.
pub const MIN_SIZE: f64 = 3.0;

/// Visibility test for one client rectangle, corrected for zoom.
pub fn is_visible(rect: Option<&Rect>, style: &ComputedStyle, viewport: &Viewport) -> bool {
    let rect = match rect {
        Some(r) => r,
        None => return false,
    };

    if !in_viewport(rect, viewport) {
        return false;
    }

    if rect.width < MIN_SIZE || rect.height < MIN_SIZE {
        return false;
    }

    style.visibility == "visible" && style.display != "none"
}

fn in_viewport(rect: &Rect, viewport: &Viewport) -> bool {
    let zoom = viewport.zoom;

    !(rect.top < 0.0
        || rect.top * zoom >= viewport.height - EDGE_MARGIN
        || rect.left < 0.0
        || rect.left * zoom >= viewport.width - EDGE_MARGIN)
}
