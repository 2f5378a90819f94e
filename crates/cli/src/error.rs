use connectors::error::SourceError;
use engine_config::settings::SettingsError;
use engine_core::error::{MappingError, StreamError};
use engine_processing::error::SyncError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to load the sync settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Sync failed: {0}")]
    Sync(#[from] SyncError),

    #[error("Failed to read the source: {0}")]
    Source(#[from] SourceError),

    #[error("Failed to resolve the source schema: {0}")]
    Mapping(#[from] MappingError),

    #[error("Streaming failed: {0}")]
    Stream(#[from] StreamError),

    #[error("Failed to read or write a file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Shutdown requested")]
    ShutdownRequested,
}
