use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A header cell could not be turned into column metadata.
    #[error("Invalid column '{column}': {reason}")]
    InvalidColumn { column: String, reason: String },

    #[error("Query not found: {0}")]
    QueryNotFound(String),

    #[error("Tabular result is already closed")]
    Closed,

    #[error("Read error: {0}")]
    Read(String),
}
