use link_hints::{
    dom::{
        dom_model::{ComputedStyle, DocumentSource, DomNode, NodeId, NodeVisibility, Rect, Viewport},
        snapshot::PageSnapshot,
    },
    scanner::scanner::scan,
};

use crate::common::utils::{fixture, links_page};

mod common;

fn nodes(elements: &[link_hints::scanner::scanner::ActionableElement]) -> Vec<NodeId> {
    elements.iter().map(|e| e.node).collect()
}

/// One link with the given rect on an otherwise empty page.
fn single_link(rect: Rect, viewport: Viewport) -> PageSnapshot {
    PageSnapshot::new(
        viewport,
        vec![
            DomNode::new("body").with_children(vec![1]),
            DomNode::new("a").with_attr("href", "/").with_text("x").with_rect(rect),
        ],
    )
}

// =========================================================================
// Visibility boundaries
// =========================================================================

#[test]
fn width_two_is_excluded_width_three_is_included() {
    let narrow = single_link(Rect::new(10.0, 10.0, 2.0, 10.0), Viewport::default());
    let wide_enough = single_link(Rect::new(10.0, 10.0, 3.0, 10.0), Viewport::default());

    assert!(scan(&narrow).is_empty(), "width 2 is too small to hint");
    assert_eq!(nodes(&scan(&wide_enough)), vec![1], "width 3 is hintable");
}

#[test]
fn height_below_three_is_excluded() {
    let flat = single_link(Rect::new(10.0, 10.0, 30.0, 2.5), Viewport::default());
    assert!(scan(&flat).is_empty());
}

#[test]
fn negative_offsets_are_off_screen() {
    let above = single_link(Rect::new(10.0, -1.0, 30.0, 10.0), Viewport::default());
    let left = single_link(Rect::new(-0.5, 10.0, 30.0, 10.0), Viewport::default());

    assert!(scan(&above).is_empty(), "top < 0");
    assert!(scan(&left).is_empty(), "left < 0");
}

#[test]
fn bottom_edge_margin_applies_after_zoom() {
    let viewport = Viewport {
        width: 800.0,
        height: 600.0,
        ..Viewport::default()
    };
    let near_bottom = Rect::new(10.0, 595.0, 30.0, 10.0);
    let at_margin = Rect::new(10.0, 596.0, 30.0, 10.0);

    assert_eq!(scan(&single_link(near_bottom, viewport)).len(), 1);
    assert!(scan(&single_link(at_margin, viewport)).is_empty());

    let zoomed = Viewport { zoom: 1.5, ..viewport };
    let mid_page = Rect::new(10.0, 400.0, 30.0, 10.0);
    assert!(
        scan(&single_link(mid_page, zoomed)).is_empty(),
        "400 * 1.5 lies below the 600px viewport"
    );
}

#[test]
fn display_none_is_excluded() {
    let mut page = single_link(Rect::new(10.0, 10.0, 30.0, 10.0), Viewport::default());
    page.nodes[1].style.display = "none".into();
    assert!(scan(&page).is_empty());
}

// =========================================================================
// Candidate discovery
// =========================================================================

#[test]
fn scan_preserves_document_order() {
    let page = links_page(&["one", "two", "three"]);
    assert_eq!(nodes(&scan(&page)), vec![1, 2, 3]);
}

#[test]
fn edge_case_page_finds_floated_child_roles_editors_and_areas() {
    let page = fixture("layout_edge_cases.json");
    let elements = scan(&page);

    assert_eq!(
        nodes(&elements),
        vec![2, 6, 9, 10],
        "floated child of a zero-size link, role=button, contenteditable, image-map area"
    );

    let area = elements.iter().find(|e| e.node == 10).unwrap();
    assert_eq!(area.rect, Rect::new(100.0, 200.0, 150.0, 100.0));
}

#[test]
fn zero_size_wrapper_only_recovers_floating_children() {
    let page = PageSnapshot::new(
        Viewport::default(),
        vec![
            DomNode::new("body").with_children(vec![1]),
            DomNode::new("a")
                .with_attr("href", "/")
                .with_rect(Rect::new(10.0, 10.0, 0.0, 0.0))
                .with_children(vec![2, 3, 4]),
            DomNode::new("span").with_rect(Rect::new(10.0, 10.0, 40.0, 10.0)),
            DomNode::new("span")
                .with_style(ComputedStyle {
                    position: "absolute".into(),
                    ..ComputedStyle::default()
                })
                .with_rect(Rect::new(10.0, 10.0, 40.0, 10.0)),
            DomNode::new("span")
                .with_style(ComputedStyle {
                    float: "right".into(),
                    ..ComputedStyle::default()
                })
                .with_rect(Rect::new(60.0, 10.0, 40.0, 10.0)),
        ],
    );

    assert_eq!(
        nodes(&scan(&page)),
        vec![3],
        "static child skipped, first positioned child taken, later ones ignored"
    );
}

#[test]
fn form_controls_skip_hidden_inputs() {
    let page = fixture("form_page.json");
    assert_eq!(nodes(&scan(&page)), vec![2, 3, 4, 6, 7, 9]);
}

#[test]
fn missing_root_yields_no_candidates() {
    let page = PageSnapshot::without_root();
    assert!(scan(&page).is_empty());
}

// =========================================================================
// Synthetic document through the capability trait
// =========================================================================

/// A document that reports layout separately from node data.
struct SyntheticDoc {
    nodes: Vec<DomNode>,
    layout: Vec<Option<Rect>>,
}

impl DocumentSource for SyntheticDoc {
    fn has_root(&self) -> bool {
        true
    }

    fn viewport(&self) -> Viewport {
        Viewport::default()
    }

    fn list_candidate_nodes(&self) -> Vec<NodeId> {
        (0..self.nodes.len()).collect()
    }

    fn node(&self, id: NodeId) -> Option<&DomNode> {
        self.nodes.get(id)
    }

    fn parent(&self, _id: NodeId) -> Option<NodeId> {
        None
    }

    fn computed_visibility(&self, id: NodeId) -> Option<NodeVisibility> {
        Some(NodeVisibility {
            rect: self.layout.get(id).copied().flatten(),
            style: ComputedStyle::default(),
        })
    }
}

#[test]
fn scanner_uses_layout_from_the_capability() {
    let doc = SyntheticDoc {
        nodes: vec![DomNode::new("button"), DomNode::new("button"), DomNode::new("select")],
        layout: vec![Some(Rect::new(0.0, 0.0, 20.0, 20.0)), None, Some(Rect::new(5.0, 50.0, 80.0, 20.0))],
    };

    assert_eq!(nodes(&scan(&doc)), vec![0, 2], "node without a layout box is dropped");
}
