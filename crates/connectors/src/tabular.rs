use crate::{error::SourceError, metadata::ColumnMetadata};
use async_trait::async_trait;
use model::records::row::Row;

/// A forward-only cursor over the rows of one query result.
///
/// Implementations are driven by a single consumer: `next_row` is never called
/// concurrently and `close` is called exactly once when the consumer is done,
/// whatever the outcome of the run.
#[async_trait]
pub trait TabularResult: Send {
    /// Column metadata, or `None` if the source cannot describe its columns.
    fn schema(&self) -> Option<&[ColumnMetadata]>;

    /// Fetches the next row, `None` once the cursor is exhausted.
    async fn next_row(&mut self) -> Result<Option<Row>, SourceError>;

    async fn close(&mut self) -> Result<(), SourceError>;
}

/// Executes queries and hands back their results.
#[async_trait]
pub trait QuerySource: Send + Sync {
    async fn open(&self, query: &str) -> Result<Box<dyn TabularResult>, SourceError>;
}
