use crate::dom::dom_model::DocumentSource;
use crate::hints::hint_model::{HintLabeler, HintMarker, HintMode, Key, MatchOutcome};
use crate::scanner::scanner::ActionableElement;

/// Sequential labeling: every marker gets a label of the same length over
/// the hint alphabet, so no label is ever a prefix of another.
pub struct SequentialLabeler {
    alphabet: Vec<char>,
    queue: Vec<char>,
}

impl SequentialLabeler {
    /// `alphabet` must hold at least two distinct characters.
    pub fn new(alphabet: &str) -> Self {
        Self {
            alphabet: alphabet.chars().collect(),
            queue: vec![],
        }
    }

    pub fn typed(&self) -> String {
        self.queue.iter().collect()
    }

    fn alphabet_char(&self, c: char) -> Option<char> {
        if self.alphabet.contains(&c) {
            return Some(c);
        }
        c.to_lowercase().find(|lower| self.alphabet.contains(lower))
    }

    fn candidates(&self, markers: &[HintMarker]) -> Vec<usize> {
        let prefix = self.typed();
        markers
            .iter()
            .enumerate()
            .filter(|(_, m)| m.label.starts_with(&prefix))
            .map(|(i, _)| i)
            .collect()
    }
}

impl HintLabeler for SequentialLabeler {
    fn mode(&self) -> HintMode {
        HintMode::Sequential
    }

    fn build_markers(
        &mut self,
        _doc: &dyn DocumentSource,
        elements: &[ActionableElement],
    ) -> Vec<HintMarker> {
        hint_strings(elements.len(), &self.alphabet)
            .into_iter()
            .zip(elements)
            .map(|(label, element)| HintMarker::new(label, *element))
            .collect()
    }

    fn match_key(&mut self, key: &Key, markers: &mut [HintMarker]) -> MatchOutcome {
        if key.is_erase() {
            // Erasing with nothing typed means the user wants out.
            if self.queue.pop().is_none() {
                return MatchOutcome::empty();
            }
        } else if let Key::Char(c) = key {
            if let Some(c) = self.alphabet_char(*c) {
                self.queue.push(c);
            }
        }

        MatchOutcome::new(self.candidates(markers), 0)
    }

    fn typed_len(&self) -> usize {
        self.queue.len()
    }

    fn display_text(&self, marker: &HintMarker) -> String {
        marker.label.to_uppercase()
    }

    fn reset(&mut self) {
        self.queue.clear();
    }
}

/// Smallest label length that gives `count` distinct labels over `base`
/// characters; 1 when `count <= 1`.
pub fn digits_needed(count: usize, base: usize) -> usize {
    if count <= 1 || base < 2 {
        return 1;
    }

    let mut digits = 0;
    let mut capacity: usize = 1;
    while capacity < count {
        capacity = capacity.saturating_mul(base);
        digits += 1;
    }
    digits
}

/// Encode `number` in base `alphabet.len()`, left-padded with the first
/// alphabet character to `digits` characters.
pub fn number_to_hint_string(mut number: usize, digits: usize, alphabet: &[char]) -> String {
    let base = alphabet.len();
    let mut hint = Vec::new();

    loop {
        let remainder = number % base;
        hint.push(alphabet[remainder]);
        number = (number - remainder) / base;
        if number == 0 {
            break;
        }
    }

    while hint.len() < digits {
        hint.push(alphabet[0]);
    }

    hint.iter().rev().collect()
}

/// Labels for `count` markers in scan order.
pub fn hint_strings(count: usize, alphabet: &[char]) -> Vec<String> {
    if alphabet.len() < 2 {
        return vec![];
    }

    let digits = digits_needed(count, alphabet.len());
    (0..count)
        .map(|i| number_to_hint_string(i, digits, alphabet))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_needed_matches_ceil_log() {
        assert_eq!(digits_needed(0, 2), 1);
        assert_eq!(digits_needed(1, 2), 1);
        assert_eq!(digits_needed(2, 2), 1);
        assert_eq!(digits_needed(3, 2), 2);
        assert_eq!(digits_needed(4, 2), 2);
        assert_eq!(digits_needed(5, 2), 3);
        assert_eq!(digits_needed(14, 14), 1);
        assert_eq!(digits_needed(15, 14), 2);
        assert_eq!(digits_needed(196, 14), 2);
        assert_eq!(digits_needed(197, 14), 3);
    }

    #[test]
    fn pads_with_first_character() {
        let alphabet: Vec<char> = "ab".chars().collect();
        assert_eq!(number_to_hint_string(0, 3, &alphabet), "aaa");
        assert_eq!(number_to_hint_string(5, 3, &alphabet), "bab");
    }
}
