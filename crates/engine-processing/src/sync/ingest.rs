use async_trait::async_trait;
use engine_core::{
    connectors::{destination::CollectionSink, sink::Sink},
    error::SinkError,
};
use model::{
    entities::ModelKind,
    records::{batch::Batch, record::Record},
};
use serde::Serialize;
use tracing::info;

/// Serializes each batch and upserts it into a target collection.
pub struct IngestSink<'a> {
    model: ModelKind,
    target: &'a mut dyn CollectionSink,
    found: usize,
    ingested: usize,
}

impl<'a> IngestSink<'a> {
    pub fn new(model: ModelKind, target: &'a mut dyn CollectionSink) -> Self {
        IngestSink {
            model,
            target,
            found: 0,
            ingested: 0,
        }
    }

    pub fn found(&self) -> usize {
        self.found
    }

    /// Documents the target reported as stored.
    pub fn ingested(&self) -> usize {
        self.ingested
    }
}

#[async_trait]
impl<'a, R> Sink<R> for IngestSink<'a>
where
    R: Record + Serialize,
{
    async fn write_batch(&mut self, batch: Batch<R>) -> Result<(), SinkError> {
        let documents = batch
            .records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        let found = documents.len();

        let added = self.target.upsert(documents).await?;
        self.found += found;
        self.ingested += added;

        info!(
            model = %self.model,
            collection = %self.target.collection(),
            batch_no = batch.seq,
            found,
            added,
            total = self.ingested,
            "Ingested batch."
        );
        Ok(())
    }
}
