use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating sync settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An environment variable override could not be applied.
    #[error("Invalid value '{value}' for {var}")]
    InvalidOverride { var: String, value: String },

    #[error("Batch size must be at least 1")]
    InvalidBatchSize,

    #[error("Table sync #{index} is invalid: {reason}")]
    InvalidTable { index: usize, reason: String },

    #[error("Unknown model '{0}'")]
    UnknownModel(String),
}
