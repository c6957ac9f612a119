use std::path::PathBuf;

use thiserror::Error;

use crate::types::PathConflict;

/// Result alias for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by the translation store and its codecs.
#[derive(Error, Debug)]
pub enum StoreError {
    /// `add_language` was called for a language that already has a file or directory
    #[error("Language '{0}' already exists")]
    LanguageExists(String),

    /// Language code cannot be used as a file or directory name
    #[error("Invalid language code '{0}'")]
    InvalidLanguage(String),

    /// Group key is missing its group or path segments
    #[error("Invalid group translation key '{key}': {reason}")]
    InvalidKey { key: String, reason: &'static str },

    /// Group key collides with an existing entry of the other kind
    #[error("Cannot set '{key}' in group '{group}': {source}")]
    KeyConflict {
        group: String,
        key: String,
        #[source]
        source: PathConflict,
    },

    /// Translation file content is not what the codec expects
    #[error("Failed to parse translation file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Translation data could not be serialized
    #[error("Failed to encode translation file {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Underlying filesystem failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
