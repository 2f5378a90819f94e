use connectors::error::SourceError;
use engine_core::error::{SinkError, StreamError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Model '{0}' is not supported")]
    UnsupportedModel(String),

    #[error("Table sync for '{0}' is split by data center but no data centers are configured")]
    NoDataCenters(String),

    #[error("Failed to open query '{query}': {source}")]
    Query {
        query: String,
        #[source]
        source: SourceError,
    },

    #[error("Streaming failed for query '{query}': {source}")]
    Stream {
        query: String,
        #[source]
        source: StreamError,
    },

    #[error("Target collection '{collection}' failed: {source}")]
    Target {
        collection: String,
        #[source]
        source: SinkError,
    },
}
