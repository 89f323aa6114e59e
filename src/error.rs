use std::fmt;

#[derive(Debug)]
pub enum HintError {
    /// Page snapshot file could not be read
    SnapshotRead { path: String, source: std::io::Error },

    /// Page snapshot was not valid JSON for the snapshot model
    SnapshotParse { context: String, source: serde_json::Error },

    /// Config file exists but is not valid YAML for the config model
    ConfigParse { path: String, source: serde_yaml::Error },

    /// Hint alphabet has fewer than two characters or repeats one
    InvalidAlphabet(String),

    /// Key name in a key script is not recognised
    UnknownKey(String),

    /// Action mode name is not one of current, new-tab, queue, copy
    UnknownActionMode(String),

    /// Hint mode name is not one of sequential, filter
    UnknownHintMode(String),
}

impl fmt::Display for HintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintError::SnapshotRead { path, source } => {
                write!(f, "Failed to read page snapshot '{}': {}", path, source)
            }
            HintError::SnapshotParse { context, source } => {
                write!(f, "Invalid page snapshot ({}): {}", context, source)
            }
            HintError::ConfigParse { path, source } => {
                write!(f, "Invalid config file '{}': {}", path, source)
            }
            HintError::InvalidAlphabet(alphabet) => {
                write!(
                    f,
                    "Hint alphabet '{}' must contain at least two distinct characters",
                    alphabet
                )
            }
            HintError::UnknownKey(key) => {
                write!(f, "Unknown key '{}'", key)
            }
            HintError::UnknownActionMode(mode) => {
                write!(
                    f,
                    "Unknown action mode '{}' (expected current, new-tab, queue or copy)",
                    mode
                )
            }
            HintError::UnknownHintMode(mode) => {
                write!(f, "Unknown hint mode '{}' (expected sequential or filter)", mode)
            }
        }
    }
}

impl std::error::Error for HintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HintError::SnapshotRead { source, .. } => Some(source),
            HintError::SnapshotParse { source, .. } => Some(source),
            HintError::ConfigParse { source, .. } => Some(source),
            _ => None,
        }
    }
}
