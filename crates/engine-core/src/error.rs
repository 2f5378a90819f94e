use connectors::error::SourceError;
use thiserror::Error;

/// Failures that stop a result from being mapped before any row is read.
#[derive(Debug, Error, PartialEq)]
pub enum MappingError {
    #[error("Query doesn't return schema info")]
    SchemaUnavailable,

    #[error("Record type '{0}' has no parameterless constructor")]
    MissingConstructor(&'static str),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConversionError {
    #[error("{converter} converter cannot handle a {actual} value")]
    UnexpectedValue {
        converter: &'static str,
        actual: &'static str,
    },

    #[error("'{value}' is not a valid {target}: {reason}")]
    Parse {
        value: String,
        target: &'static str,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Failed to write batch: {0}")]
    Write(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Sink error: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Batch size must be at least 1")]
    InvalidBatchSize,

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("Failed to read from source: {0}")]
    Source(#[from] SourceError),

    #[error("Sink rejected batch #{batch_no}: {source}")]
    Sink {
        batch_no: usize,
        #[source]
        source: SinkError,
    },
}
