use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dom::dom_model::DocumentSource;
use crate::error::HintError;
use crate::hints::alphabet::SequentialLabeler;
use crate::hints::filter::FilterLabeler;
use crate::scanner::scanner::ActionableElement;

// ============================================================================
// Keys
// ============================================================================

/// A key as seen by hint mode. Printable keys arrive as `Char`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Delete,
    Enter,
    Escape,
    Shift,
    Other(String),
}

impl Key {
    /// Backspace and Delete both erase the last typed character.
    pub fn is_erase(&self) -> bool {
        matches!(self, Key::Backspace | Key::Delete)
    }

    /// Parse a whitespace separated key script such as `a s <BS> <Enter>`.
    pub fn parse_script(script: &str) -> Result<Vec<Key>, HintError> {
        script.split_whitespace().map(str::parse).collect()
    }
}

impl FromStr for Key {
    type Err = HintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Key::Char(c));
        }

        match s.to_lowercase().as_str() {
            "<bs>" | "<backspace>" => Ok(Key::Backspace),
            "<del>" | "<delete>" => Ok(Key::Delete),
            "<cr>" | "<enter>" | "<return>" => Ok(Key::Enter),
            "<esc>" | "<escape>" => Ok(Key::Escape),
            "<shift>" => Ok(Key::Shift),
            "<space>" => Ok(Key::Char(' ')),
            "<tab>" => Ok(Key::Other("Tab".into())),
            _ => Err(HintError::UnknownKey(s.to_string())),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(' ') => write!(f, "<Space>"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Backspace => write!(f, "<BS>"),
            Key::Delete => write!(f, "<Del>"),
            Key::Enter => write!(f, "<Enter>"),
            Key::Escape => write!(f, "<Esc>"),
            Key::Shift => write!(f, "<Shift>"),
            Key::Other(name) => write!(f, "<{}>", name),
        }
    }
}

// ============================================================================
// Markers
// ============================================================================

/// The label and metadata bound to one actionable element for the duration
/// of an activation.
///
/// Only `visible`, `filtered` and (in filter mode) `label` change after
/// creation.
#[derive(Debug, Clone, PartialEq)]
pub struct HintMarker {
    /// Key sequence that selects this marker
    pub label: String,

    /// Text matched by filter mode; empty in sequential mode
    pub match_text: String,

    /// Display `match_text` next to the label
    pub show_link_text: bool,

    pub element: ActionableElement,

    pub visible: bool,

    /// Excluded by the filter-mode text query
    pub filtered: bool,
}

impl HintMarker {
    pub fn new(label: String, element: ActionableElement) -> Self {
        Self {
            label,
            match_text: String::new(),
            show_link_text: false,
            element,
            visible: true,
            filtered: false,
        }
    }
}

/// Result of feeding one key to a labeler.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchOutcome {
    /// Indices of the remaining candidates, in scan order
    pub matched: Vec<usize>,

    /// Suggested wait before acting on a single match
    pub delay_ms: u64,
}

impl MatchOutcome {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(matched: Vec<usize>, delay_ms: u64) -> Self {
        Self { matched, delay_ms }
    }
}

// ============================================================================
// Labeling strategies
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintMode {
    /// Fixed-length labels over the hint alphabet, narrowed by prefix
    #[default]
    Sequential,
    /// Numeric labels, narrowed by number prefix or by link text
    Filter,
}

impl FromStr for HintMode {
    type Err = HintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" | "alphabet" => Ok(HintMode::Sequential),
            "filter" | "numeric" => Ok(HintMode::Filter),
            _ => Err(HintError::UnknownHintMode(s.to_string())),
        }
    }
}

/// Label generation and key matching for one activation.
///
/// A labeler owns its typed-key state; a fresh one is built per session.
pub trait HintLabeler {
    fn mode(&self) -> HintMode;

    /// Create one marker per element, in scan order.
    fn build_markers(
        &mut self,
        doc: &dyn DocumentSource,
        elements: &[ActionableElement],
    ) -> Vec<HintMarker>;

    /// Consume one key and return the narrowed candidate set.
    fn match_key(&mut self, key: &Key, markers: &mut [HintMarker]) -> MatchOutcome;

    /// Number of label characters already typed, for highlighting.
    fn typed_len(&self) -> usize;

    /// Text shown inside the marker.
    fn display_text(&self, marker: &HintMarker) -> String;

    /// Clear all typed-key state.
    fn reset(&mut self);
}

/// Build a fresh labeler for one activation.
pub fn labeler_for(mode: HintMode, alphabet: &str, text_delay_ms: u64) -> Box<dyn HintLabeler> {
    match mode {
        HintMode::Sequential => Box::new(SequentialLabeler::new(alphabet)),
        HintMode::Filter => Box::new(FilterLabeler::new(text_delay_ms)),
    }
}
