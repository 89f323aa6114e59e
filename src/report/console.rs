use crate::controller::host::HostEvent;
use crate::dom::dom_model::DocumentSource;
use crate::hints::hint_model::{HintLabeler, HintMarker};
use crate::report::report_model::ReplayReport;
use crate::scanner::scanner::ActionableElement;

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// Format the result of a scan, one element per line:
/// ```text
/// 2 actionable elements
///   #3  <a>       (10, 20) 40x12  "test"
/// ```
pub fn format_scan_report(doc: &dyn DocumentSource, elements: &[ActionableElement]) -> String {
    let mut out = format!("{} actionable elements\n", elements.len());

    for el in elements {
        let (tag, text) = describe_node(doc, el.node);
        out.push_str(&format!(
            "  #{:<3} {:<9} ({}, {}) {}x{}  \"{}\"\n",
            el.node,
            format!("<{}>", tag),
            el.rect.left,
            el.rect.top,
            el.rect.width,
            el.rect.height,
            text
        ));
    }

    out
}

/// Format a marker table as the user would see it.
pub fn format_marker_table(
    doc: &dyn DocumentSource,
    markers: &[HintMarker],
    labeler: &dyn HintLabeler,
) -> String {
    let mut out = format!("{} hint markers ({:?} mode)\n", markers.len(), labeler.mode());

    for marker in markers {
        let (tag, _) = describe_node(doc, marker.element.node);
        out.push_str(&format!(
            "  {:<8} #{:<3} <{}>",
            labeler.display_text(marker),
            marker.element.node,
            tag
        ));
        if !marker.match_text.is_empty() && !marker.show_link_text {
            out.push_str(&format!("  \"{}\"", marker.match_text));
        }
        out.push('\n');
    }

    out
}

/// Format a replay transcript:
/// ```text
/// === Replay (CurrentTab) ===
/// activate
///     status "Open link in current tab"
/// key t -> active
///     update markers [1, 2]
/// === Finished: inactive after 400ms ===
/// ```
pub fn format_replay_report(report: &ReplayReport) -> String {
    let mut out = format!("=== Replay ({:?}) ===\n", report.mode);

    out.push_str("activate\n");
    push_events(&mut out, &report.activation);

    for step in &report.steps {
        out.push_str(&format!("key {} -> {}", step.key, step.phase));
        if step.propagated {
            out.push_str(" (propagated)");
        }
        out.push('\n');
        push_events(&mut out, &step.events);
    }

    if !report.settle.is_empty() {
        out.push_str("settle\n");
        push_events(&mut out, &report.settle);
    }

    out.push_str(&format!(
        "=== Finished: {} after {}ms ===\n",
        report.final_phase, report.elapsed_ms
    ));

    out
}

fn push_events(out: &mut String, events: &[HostEvent]) {
    for event in events {
        out.push_str(&format!("    {}\n", event));
    }
}

fn describe_node(doc: &dyn DocumentSource, id: usize) -> (String, String) {
    match doc.node(id) {
        Some(node) => {
            let text: String = node.text.split_whitespace().collect::<Vec<_>>().join(" ");
            let text = if text.chars().count() > 40 {
                format!("{}...", text.chars().take(40).collect::<String>())
            } else {
                text
            };
            (node.tag_name(), text)
        }
        None => ("?".to_string(), String::new()),
    }
}
