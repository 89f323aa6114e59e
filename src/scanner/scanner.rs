use crate::dom::dom_model::{DocumentSource, NodeId, Rect};
use crate::scanner::clickable::is_clickable;
use crate::scanner::visibility::is_visible;

/// A hintable node plus its client rectangle at scan time.
///
/// The rectangle is a snapshot and is not refreshed if layout changes while
/// hints are displayed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionableElement {
    pub node: NodeId,
    pub rect: Rect,
}

/// Returns every clickable element that is visible in the viewport, in
/// document order.
pub fn scan(doc: &dyn DocumentSource) -> Vec<ActionableElement> {
    if !doc.has_root() {
        return vec![];
    }

    let viewport = doc.viewport();
    let mut visible = Vec::new();

    for id in doc.list_candidate_nodes() {
        let node = match doc.node(id) {
            Some(n) => n,
            None => continue,
        };

        if !is_clickable(node) {
            continue;
        }

        let layout = match doc.computed_visibility(id) {
            Some(l) => l,
            None => continue,
        };

        if is_visible(layout.rect.as_ref(), &layout.style, &viewport) {
            if let Some(rect) = layout.rect {
                visible.push(ActionableElement { node: id, rect });
            }
        }

        // A zero-size wrapper may still hold visible floated or absolutely
        // positioned content.
        if layout.rect.map(|r| r.is_collapsed()).unwrap_or(false) {
            if let Some(child) = first_visible_floating_child(doc, id) {
                visible.push(child);
            }
        }

        if node.tag_name() == "area" {
            if let Some(rect) = area_rect(doc, id) {
                visible.push(ActionableElement { node: id, rect });
            }
        }
    }

    visible
}

fn first_visible_floating_child(doc: &dyn DocumentSource, id: NodeId) -> Option<ActionableElement> {
    let viewport = doc.viewport();

    doc.children(id).into_iter().find_map(|child| {
        let layout = doc.computed_visibility(child)?;
        if !(layout.style.is_floated() || layout.style.is_absolute()) {
            return None;
        }
        if !is_visible(layout.rect.as_ref(), &layout.style, &viewport) {
            return None;
        }
        layout.rect.map(|rect| ActionableElement { node: child, rect })
    })
}

/// Rectangle of an image-map `<area>`: the mapped image's rect offset by
/// the area's `left,top,right,bottom` coords.
fn area_rect(doc: &dyn DocumentSource, id: NodeId) -> Option<Rect> {
    let area = doc.node(id)?;
    let map = doc.node(doc.parent(id)?)?;
    let name = map.attr("name")?;
    let image = doc.image_for_map(name)?;
    let image_rect = doc.computed_visibility(image)?.rect?;

    let coords: Vec<f64> = area
        .attr("coords")?
        .split(',')
        .map(|c| c.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;
    if coords.len() < 4 {
        return None;
    }

    Some(Rect {
        top: image_rect.top + coords[1],
        left: image_rect.left + coords[0],
        width: coords[2] - coords[0],
        height: coords[3] - coords[1],
    })
}
