use std::collections::HashMap;

use crate::dom::dom_model::DocumentSource;
use crate::hints::hint_model::{HintLabeler, HintMarker, HintMode, Key, MatchOutcome};
use crate::hints::link_text::{generate_label_map, generate_link_text};
use crate::scanner::scanner::ActionableElement;

/// Delay suggested when typing link text narrows to a single match. People
/// tend to keep typing past the unique point; those keys get swallowed.
pub const TEXT_MATCH_DELAY_MS: u64 = 200;

/// Filter labeling: markers are numbered 1..n and can be narrowed either by
/// typing a number prefix or by typing part of the link text.
pub struct FilterLabeler {
    hint_queue: Vec<char>,
    text_queue: Vec<char>,
    label_map: HashMap<String, String>,
    text_delay_ms: u64,
}

impl Default for FilterLabeler {
    fn default() -> Self {
        Self::new(TEXT_MATCH_DELAY_MS)
    }
}

impl FilterLabeler {
    pub fn new(text_delay_ms: u64) -> Self {
        Self {
            hint_queue: vec![],
            text_queue: vec![],
            label_map: HashMap::new(),
            text_delay_ms,
        }
    }

    pub fn typed_number(&self) -> String {
        self.hint_queue.iter().collect()
    }

    pub fn typed_text(&self) -> String {
        self.text_queue.iter().collect()
    }

    /// Hide markers whose text does not contain the typed text and number
    /// the rest 1..k in scan order. Returns the indices still matching.
    pub fn filter_link_hints(&self, markers: &mut [HintMarker]) -> Vec<usize> {
        let search = self.typed_text().to_lowercase();
        let mut matched = Vec::new();

        for (i, marker) in markers.iter_mut().enumerate() {
            if marker.match_text.to_lowercase().contains(&search) {
                marker.filtered = false;
                marker.visible = true;
                marker.label = hint_number(matched.len());
                matched.push(i);
            } else {
                marker.filtered = true;
                marker.visible = false;
            }
        }

        matched
    }
}

impl HintLabeler for FilterLabeler {
    fn mode(&self) -> HintMode {
        HintMode::Filter
    }

    fn build_markers(
        &mut self,
        doc: &dyn DocumentSource,
        elements: &[ActionableElement],
    ) -> Vec<HintMarker> {
        self.label_map = generate_label_map(doc);

        elements
            .iter()
            .enumerate()
            .map(|(i, element)| {
                let link_text = generate_link_text(doc, element.node, &self.label_map);
                let mut marker = HintMarker::new(hint_number(i), *element);
                marker.match_text = link_text.text;
                marker.show_link_text = link_text.show;
                marker
            })
            .collect()
    }

    fn match_key(&mut self, key: &Key, markers: &mut [HintMarker]) -> MatchOutcome {
        let mut typing_text = false;

        match key {
            Key::Enter => {
                // Lowest-numbered visible marker wins, however many remain.
                if let Some(first) = markers.iter().position(|m| m.visible && !m.filtered) {
                    return MatchOutcome::new(vec![first], 0);
                }
            }
            key if key.is_erase() => {
                // Number first, then text; both empty means exit.
                if self.hint_queue.pop().is_none() && self.text_queue.pop().is_none() {
                    return MatchOutcome::empty();
                }
            }
            Key::Char(c) if c.is_ascii_digit() => {
                self.hint_queue.push(*c);
            }
            Key::Char(c) => {
                // Renumbering may change what a partial number refers to.
                self.hint_queue.clear();
                self.text_queue.push(*c);
                typing_text = true;
            }
            _ => {}
        }

        let prefix = self.typed_number();
        let matched: Vec<usize> = self
            .filter_link_hints(markers)
            .into_iter()
            .filter(|&i| markers[i].label.starts_with(&prefix))
            .collect();

        let delay_ms = if matched.len() == 1 && typing_text {
            self.text_delay_ms
        } else {
            0
        };

        MatchOutcome::new(matched, delay_ms)
    }

    fn typed_len(&self) -> usize {
        self.hint_queue.len()
    }

    fn display_text(&self, marker: &HintMarker) -> String {
        if marker.show_link_text {
            format!("{}: {}", marker.label, marker.match_text)
        } else {
            marker.label.clone()
        }
    }

    fn reset(&mut self) {
        self.hint_queue.clear();
        self.text_queue.clear();
        self.label_map.clear();
    }
}

fn hint_number(index: usize) -> String {
    (index + 1).to_string()
}
