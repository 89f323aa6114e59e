use std::collections::HashMap;

use crate::dom::dom_model::{DocumentSource, NodeId};

/// Text a filter-mode marker is matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkText {
    pub text: String,

    /// True when the text came from a label, alt or title and should be
    /// displayed next to the hint number.
    pub show: bool,
}

/// Map of element id => text of the `<label for=...>` pointing at it.
///
/// A trailing colon, as in "Name:", is dropped.
pub fn generate_label_map(doc: &dyn DocumentSource) -> HashMap<String, String> {
    let mut labels = HashMap::new();

    for id in doc.list_candidate_nodes() {
        let node = match doc.node(id) {
            Some(n) if n.tag_name() == "label" => n,
            _ => continue,
        };

        if let Some(target) = node.attr("for") {
            let text = node.text.trim();
            let text = text.strip_suffix(':').unwrap_or(text);
            labels.insert(target.to_string(), text.to_string());
        }
    }

    labels
}

pub fn generate_link_text(
    doc: &dyn DocumentSource,
    id: NodeId,
    label_map: &HashMap<String, String>,
) -> LinkText {
    let node = match doc.node(id) {
        Some(n) => n,
        None => return LinkText { text: String::new(), show: false },
    };

    let tag = node.tag_name();

    if matches!(tag.as_str(), "input" | "textarea" | "select") {
        if let Some(label) = node.attr("id").and_then(|element_id| label_map.get(element_id)) {
            if !label.is_empty() {
                return LinkText { text: label.clone(), show: true };
            }
        }
    }

    if tag == "input" {
        // Never expose what was typed into a password field.
        if node.input_type().as_deref() == Some("password") {
            return LinkText { text: String::new(), show: false };
        }
        return LinkText {
            text: node.value.clone().unwrap_or_default(),
            show: false,
        };
    }

    if tag == "a" && node.text.trim().is_empty() {
        let image = doc
            .children(id)
            .into_iter()
            .next()
            .and_then(|child| doc.node(child))
            .filter(|child| child.tag_name() == "img");

        if let Some(image) = image {
            let text = image
                .attr("alt")
                .filter(|alt| !alt.is_empty())
                .or_else(|| image.attr("title"))
                .unwrap_or("")
                .to_string();
            let show = !text.is_empty();
            return LinkText { text, show };
        }
    }

    let content = if node.text.is_empty() {
        node.html.as_deref().unwrap_or("")
    } else {
        node.text.as_str()
    };

    LinkText {
        text: content.trim().to_lowercase(),
        show: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::dom_model::DomNode;
    use crate::dom::snapshot::PageSnapshot;

    fn snapshot(nodes: Vec<DomNode>) -> PageSnapshot {
        PageSnapshot::new(Default::default(), nodes)
    }

    #[test]
    fn label_text_wins_over_value() {
        let doc = snapshot(vec![
            DomNode::new("label").with_attr("for", "q").with_text(" Search: "),
            DomNode::new("input").with_attr("id", "q").with_value("rust"),
        ]);
        let labels = generate_label_map(&doc);
        assert_eq!(labels.get("q").map(String::as_str), Some("Search"));

        let text = generate_link_text(&doc, 1, &labels);
        assert_eq!(text, LinkText { text: "Search".into(), show: true });
    }

    #[test]
    fn password_value_is_never_used() {
        let doc = snapshot(vec![
            DomNode::new("input").with_attr("type", "password").with_value("hunter2"),
        ]);
        let text = generate_link_text(&doc, 0, &HashMap::new());
        assert_eq!(text.text, "");
    }

    #[test]
    fn image_link_uses_alt_then_title() {
        let doc = snapshot(vec![
            DomNode::new("a").with_children(vec![1]),
            DomNode::new("img").with_attr("alt", "").with_attr("title", "Home"),
        ]);
        let text = generate_link_text(&doc, 0, &HashMap::new());
        assert_eq!(text, LinkText { text: "Home".into(), show: true });
    }

    #[test]
    fn plain_text_is_trimmed_and_lowercased() {
        let doc = snapshot(vec![DomNode::new("a").with_text("  Read MORE ")]);
        let text = generate_link_text(&doc, 0, &HashMap::new());
        assert_eq!(text, LinkText { text: "read more".into(), show: false });
    }
}
