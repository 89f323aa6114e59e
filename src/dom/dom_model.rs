use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Index of a node inside a document, in document order.
pub type NodeId = usize;

// ============================================================================
// Layout primitives
// ============================================================================

/// A client rectangle in CSS pixels, relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn is_collapsed(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// The subset of computed style the scanner looks at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedStyle {
    #[serde(default = "default_visible")]
    pub visibility: String,

    #[serde(default = "default_block")]
    pub display: String,

    #[serde(default = "default_none")]
    pub float: String,

    #[serde(default = "default_static")]
    pub position: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            visibility: default_visible(),
            display: default_block(),
            float: default_none(),
            position: default_static(),
        }
    }
}

impl ComputedStyle {
    pub fn is_floated(&self) -> bool {
        self.float != "none"
    }

    pub fn is_absolute(&self) -> bool {
        self.position == "absolute"
    }
}

fn default_visible() -> String { "visible".to_string() }
fn default_block() -> String { "block".to_string() }
fn default_none() -> String { "none".to_string() }
fn default_static() -> String { "static".to_string() }

/// Window geometry at scan time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,

    /// Zoom factor (1.0 == 100%).
    #[serde(default = "default_zoom")]
    pub zoom: f64,

    #[serde(default)]
    pub scroll_x: f64,

    #[serde(default)]
    pub scroll_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            zoom: 1.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

fn default_zoom() -> f64 { 1.0 }

// ============================================================================
// Nodes
// ============================================================================

/// One element of a document.
///
/// `rect` is the element's first client rect; `None` when the element has
/// no layout box at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomNode {
    pub tag: String,

    #[serde(default)]
    pub attrs: BTreeMap<String, String>,

    /// textContent
    #[serde(default)]
    pub text: String,

    /// innerHTML, used when there is no text content
    #[serde(default)]
    pub html: Option<String>,

    /// Current value of form controls
    #[serde(default)]
    pub value: Option<String>,

    #[serde(default)]
    pub rect: Option<Rect>,

    #[serde(default)]
    pub style: ComputedStyle,

    #[serde(default)]
    pub children: Vec<NodeId>,
}

impl DomNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    pub fn with_style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_children(mut self, children: Vec<NodeId>) -> Self {
        self.children = children;
        self
    }

    /// Lower-cased tag name (XHTML documents report lower case, HTML upper).
    pub fn tag_name(&self) -> String {
        self.tag.to_lowercase()
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// The `type` attribute, lower-cased.
    pub fn input_type(&self) -> Option<String> {
        self.attr("type").map(str::to_lowercase)
    }
}

/// Layout snapshot of a single node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeVisibility {
    pub rect: Option<Rect>,
    pub style: ComputedStyle,
}

// ============================================================================
// Document capability
// ============================================================================

/// Read-only view of a live document.
///
/// The scanner and the labelers only ever talk to a document through this
/// trait, so they can be driven from a JSON snapshot or a synthetic node list.
pub trait DocumentSource {
    /// False before the document has a root element.
    fn has_root(&self) -> bool;

    fn viewport(&self) -> Viewport;

    /// All element nodes below the root, in document order.
    fn list_candidate_nodes(&self) -> Vec<NodeId>;

    fn node(&self, id: NodeId) -> Option<&DomNode>;

    fn parent(&self, id: NodeId) -> Option<NodeId>;

    fn computed_visibility(&self, id: NodeId) -> Option<NodeVisibility> {
        self.node(id).map(|n| NodeVisibility {
            rect: n.rect,
            style: n.style.clone(),
        })
    }

    fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).map(|n| n.children.clone()).unwrap_or_default()
    }

    /// First `<img>` whose `usemap` refers to the map called `name`.
    fn image_for_map(&self, name: &str) -> Option<NodeId> {
        let usemap = format!("#{}", name);
        self.list_candidate_nodes().into_iter().find(|&id| {
            self.node(id)
                .map(|n| n.tag_name() == "img" && n.attr("usemap") == Some(usemap.as_str()))
                .unwrap_or(false)
        })
    }
}
