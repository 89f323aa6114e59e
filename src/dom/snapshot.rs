use serde::{Deserialize, Serialize};

use crate::dom::dom_model::{DocumentSource, DomNode, NodeId, Viewport};
use crate::error::HintError;

/// A document captured as JSON: viewport geometry plus a flat node list in
/// document order. Children refer to other nodes by index.
///
/// ```json
/// {
///   "viewport": { "width": 1024, "height": 768 },
///   "nodes": [
///     { "tag": "body", "children": [1] },
///     { "tag": "a", "attrs": { "href": "/a" }, "text": "test",
///       "rect": { "top": 10, "left": 10, "width": 40, "height": 12 } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub title: String,

    /// False when captured before the document had a root element.
    #[serde(default = "default_true")]
    pub has_root: bool,

    #[serde(default)]
    pub viewport: Viewport,

    #[serde(default)]
    pub nodes: Vec<DomNode>,
}

fn default_true() -> bool { true }

impl PageSnapshot {
    pub fn new(viewport: Viewport, nodes: Vec<DomNode>) -> Self {
        Self {
            url: None,
            title: String::new(),
            has_root: true,
            viewport,
            nodes,
        }
    }

    /// A document that has not created its root element yet.
    pub fn without_root() -> Self {
        Self {
            has_root: false,
            ..Self::default()
        }
    }

    pub fn from_json(content: &str, context: &str) -> Result<Self, HintError> {
        serde_json::from_str(content).map_err(|source| HintError::SnapshotParse {
            context: context.to_string(),
            source,
        })
    }

    pub fn load(path: &str) -> Result<Self, HintError> {
        let content = std::fs::read_to_string(path).map_err(|source| HintError::SnapshotRead {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content, path)
    }

    /// Append a node and return its id.
    pub fn push(&mut self, node: DomNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }
}

impl DocumentSource for PageSnapshot {
    fn has_root(&self) -> bool {
        self.has_root
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn list_candidate_nodes(&self) -> Vec<NodeId> {
        if !self.has_root {
            return vec![];
        }
        (0..self.nodes.len()).collect()
    }

    fn node(&self, id: NodeId) -> Option<&DomNode> {
        self.nodes.get(id)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.children.contains(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_snapshot_with_defaults() {
        let json = r#"{ "nodes": [ { "tag": "body", "children": [1] }, { "tag": "a", "text": "x" } ] }"#;
        let snapshot = PageSnapshot::from_json(json, "inline").unwrap();

        assert!(snapshot.has_root);
        assert_eq!(snapshot.viewport.zoom, 1.0);
        assert_eq!(snapshot.nodes[1].style.visibility, "visible");
        assert_eq!(snapshot.parent(1), Some(0));
        assert_eq!(snapshot.parent(0), None);
    }

    #[test]
    fn rootless_snapshot_lists_nothing() {
        let mut snapshot = PageSnapshot::without_root();
        snapshot.push(DomNode::new("a"));
        assert!(snapshot.list_candidate_nodes().is_empty());
    }

    #[test]
    fn malformed_json_is_reported_with_context() {
        let err = PageSnapshot::from_json("{ nope", "page.json").unwrap_err();
        assert!(err.to_string().contains("page.json"));
    }
}
