#![allow(dead_code)]

use link_hints::{
    cli::config::HintSettings,
    dom::{
        dom_model::{DomNode, Rect, Viewport},
        snapshot::PageSnapshot,
    },
    hints::hint_model::{HintMode, Key},
};

pub fn fixture(name: &str) -> PageSnapshot {
    let base = std::env::current_dir().unwrap();
    let path = base.join("tests").join("fixtures").join(name);

    PageSnapshot::load(path.to_str().unwrap()).unwrap()
}

/// A page with one visible link per text, stacked vertically.
pub fn links_page(texts: &[&str]) -> PageSnapshot {
    let mut snapshot = PageSnapshot::new(Viewport::default(), vec![]);
    let body = snapshot.push(DomNode::new("body"));

    for (i, text) in texts.iter().enumerate() {
        let id = snapshot.push(
            DomNode::new("a")
                .with_attr("href", &format!("/{}", i))
                .with_text(text)
                .with_rect(Rect::new(10.0, 10.0 + 20.0 * i as f64, 60.0, 14.0)),
        );
        snapshot.nodes[body].children.push(id);
    }

    snapshot
}

pub fn settings(mode: HintMode) -> HintSettings {
    HintSettings {
        mode,
        ..HintSettings::default()
    }
}

pub fn sequential(alphabet: &str) -> HintSettings {
    HintSettings {
        mode: HintMode::Sequential,
        alphabet: alphabet.to_string(),
        ..HintSettings::default()
    }
}

pub fn keys(script: &str) -> Vec<Key> {
    Key::parse_script(script).unwrap()
}
