use crate::dom::dom_model::DomNode;

/// Whether a node is something the user can act on: links, buttons, form
/// controls, and anything carrying an interactive attribute or role.
pub fn is_clickable(node: &DomNode) -> bool {
    let clickable_tag = match node.tag_name().as_str() {
        "a" | "textarea" | "button" | "select" => true,
        "area" => node.has_attr("href"),
        "input" => {
            node.input_type().as_deref() != Some("hidden")
                && !node.has_attr("disabled")
                && !node.has_attr("readonly")
        }
        _ => false,
    };

    clickable_tag || has_interactive_attribute(node)
}

fn has_interactive_attribute(node: &DomNode) -> bool {
    if node.has_attr("onclick") || node.has_attr("tabindex") {
        return true;
    }

    if matches!(node.attr("role"), Some("link") | Some("button")) {
        return true;
    }

    if node
        .attr("class")
        .map(|c| c.contains("button"))
        .unwrap_or(false)
    {
        return true;
    }

    is_content_editable(node)
}

pub fn is_content_editable(node: &DomNode) -> bool {
    match node.attr("contenteditable") {
        Some(value) => value.is_empty() || value.eq_ignore_ascii_case("true"),
        None => false,
    }
}

/// Selectable means the element takes a text caret, so resolving it selects
/// the field instead of clicking it.
pub fn is_selectable(node: &DomNode) -> bool {
    match node.tag_name().as_str() {
        "textarea" => true,
        "input" => !matches!(
            node.input_type().as_deref(),
            Some("button")
                | Some("checkbox")
                | Some("color")
                | Some("file")
                | Some("hidden")
                | Some("image")
                | Some("radio")
                | Some("reset")
                | Some("submit")
        ),
        _ => is_content_editable(node),
    }
}

/// Inputs other than buttons get keyboard focus before being activated.
pub fn wants_focus(node: &DomNode) -> bool {
    node.tag_name() == "input" && node.input_type().as_deref() != Some("button")
}
