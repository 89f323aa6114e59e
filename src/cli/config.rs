use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::error::HintError;
use crate::hints::filter::TEXT_MATCH_DELAY_MS;
use crate::hints::hint_model::HintMode;

pub const DEFAULT_CONFIG_PATH: &str = "link-hints.yaml";
pub const DEFAULT_ALPHABET: &str = "sadfjklewcmpgh";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "link-hints",
    version,
    about = "Keyboard link hinting over page snapshots"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Labeling mode: sequential or filter
    #[arg(long, global = true)]
    pub mode: Option<String>,

    /// Characters used for sequential hint labels
    #[arg(long, global = true)]
    pub alphabet: Option<String>,

    /// Append JSON-lines trace events to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,

    /// Path to config file (default: link-hints.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the visible actionable elements of a page snapshot
    Scan {
        /// Page snapshot JSON file
        #[arg(long)]
        page: String,
    },

    /// Print the hint markers a page snapshot would get
    Hints {
        /// Page snapshot JSON file
        #[arg(long)]
        page: String,
    },

    /// Activate hint mode on a snapshot and feed it a key script
    Replay {
        /// Page snapshot JSON file
        #[arg(long)]
        page: String,

        /// Whitespace separated keys, e.g. "t r <BS> <Enter>"
        #[arg(long)]
        keys: String,

        /// Action mode: current, new-tab, queue or copy
        #[arg(long, default_value = "current")]
        action: String,

        /// Virtual milliseconds to let pass after each key
        #[arg(long, default_value_t = 0)]
        key_interval_ms: u64,

        /// Virtual milliseconds to let pass after the last key
        #[arg(long, default_value_t = 1000)]
        settle_ms: u64,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `link-hints.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub hints: HintSettings,
    #[serde(default)]
    pub trace: TraceSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Mac,
    #[default]
    Other,
}

/// Settings read once per activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintSettings {
    #[serde(default)]
    pub mode: HintMode,

    #[serde(default = "default_alphabet")]
    pub alphabet: String,

    /// Decides which modifier opens a new tab (meta on Mac, ctrl elsewhere)
    #[serde(default)]
    pub platform: Platform,

    /// Time between focusing a current-tab target and clicking it
    #[serde(default = "default_click_delay")]
    pub current_tab_click_delay_ms: u64,

    /// Delay after link text typing narrows filter mode to one marker
    #[serde(default = "default_text_delay")]
    pub filter_text_delay_ms: u64,
}

impl Default for HintSettings {
    fn default() -> Self {
        Self {
            mode: HintMode::default(),
            alphabet: default_alphabet(),
            platform: Platform::default(),
            current_tab_click_delay_ms: default_click_delay(),
            filter_text_delay_ms: default_text_delay(),
        }
    }
}

impl HintSettings {
    /// The alphabet needs at least two characters, none repeated.
    pub fn validate(&self) -> Result<(), HintError> {
        let chars: Vec<char> = self.alphabet.chars().collect();
        let mut distinct = chars.clone();
        distinct.sort_unstable();
        distinct.dedup();

        if chars.len() < 2 || distinct.len() != chars.len() {
            return Err(HintError::InvalidAlphabet(self.alphabet.clone()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceSettings {
    pub path: Option<String>,
}

// Serde default helpers
fn default_alphabet() -> String { DEFAULT_ALPHABET.to_string() }
fn default_click_delay() -> u64 { 400 }
fn default_text_delay() -> u64 { TEXT_MATCH_DELAY_MS }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. A missing file gives defaults; a file that
/// exists but does not parse is an error.
pub fn load_config(path: Option<&str>) -> Result<AppConfig, HintError> {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => parse_config(&content, config_path),
        Err(_) => Ok(AppConfig::default()),
    }
}

pub fn parse_config(content: &str, path: &str) -> Result<AppConfig, HintError> {
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    serde_yaml::from_str(content).map_err(|source| HintError::ConfigParse {
        path: path.to_string(),
        source,
    })
}

// ============================================================================
// Settings resolution (CLI > config file > defaults)
// ============================================================================

pub fn resolve_settings(cli: &Cli, config: &AppConfig) -> Result<HintSettings, HintError> {
    let mut settings = config.hints.clone();

    if let Some(mode) = cli.mode.as_deref() {
        settings.mode = mode.parse()?;
    }
    if let Some(alphabet) = cli.alphabet.as_deref() {
        settings.alphabet = alphabet.to_string();
    }

    settings.validate()?;
    Ok(settings)
}

pub fn resolve_trace_path(cli: &Cli, config: &AppConfig) -> Option<String> {
    cli.trace.clone().or_else(|| config.trace.path.clone())
}
