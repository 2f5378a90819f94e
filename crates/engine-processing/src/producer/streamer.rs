use connectors::tabular::TabularResult;
use engine_core::{
    connectors::sink::{CollectSink, Sink},
    error::StreamError,
    mapping::{
        converter::ConverterRegistry,
        field_mapper::{FieldMapper, FieldMapping},
        materializer::materialize,
        schema::resolve_schema,
    },
    metrics::Metrics,
};
use model::records::{batch::Batch, record::Record};
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Outcome of one streaming run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamSummary {
    pub batches: usize,
    /// Records handed to the sink.
    pub records: usize,
    /// Records materialized but discarded because the run was cancelled.
    pub dropped: usize,
    pub cancelled: bool,
    pub unmapped: Vec<String>,
    pub conversion_failures: usize,
}

/// Reads a tabular result row by row and hands typed records to a sink in
/// fixed-size batches.
///
/// One batch is in flight at a time: the sink call is awaited before the next
/// row is read. Cancellation is checked before every read; once it is
/// signalled, rows gathered for a batch that has not reached the configured
/// size are discarded. The result is closed on every exit path.
#[derive(Debug, Clone)]
pub struct BatchStreamer {
    batch_size: usize,
    mapper: FieldMapper,
    metrics: Option<Metrics>,
    run_id: String,
}

impl BatchStreamer {
    pub fn new(batch_size: usize) -> Result<Self, StreamError> {
        if batch_size == 0 {
            return Err(StreamError::InvalidBatchSize);
        }

        Ok(BatchStreamer {
            batch_size,
            mapper: FieldMapper::default(),
            metrics: None,
            run_id: uuid::Uuid::new_v4().to_string(),
        })
    }

    pub fn with_registry(mut self, registry: Arc<ConverterRegistry>) -> Self {
        self.mapper = FieldMapper::new(registry);
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Resolves the result's schema and builds the mapping for `R`.
    pub fn prepare<R, T>(&self, result: &T) -> Result<FieldMapping<R>, StreamError>
    where
        R: Record,
        T: TabularResult + ?Sized,
    {
        let columns = resolve_schema(result)?;
        Ok(self.mapper.build::<R>(&columns)?)
    }

    /// Maps and streams the whole result into `sink`.
    pub async fn stream<R, T, S>(
        &self,
        result: &mut T,
        cancel: &CancellationToken,
        sink: &mut S,
    ) -> Result<StreamSummary, StreamError>
    where
        R: Record,
        T: TabularResult + ?Sized,
        S: Sink<R> + ?Sized,
    {
        let mapping = match self.prepare::<R, T>(result) {
            Ok(mapping) => mapping,
            Err(err) => {
                if let Err(close_err) = result.close().await {
                    warn!(error = %close_err, "Failed to close tabular result.");
                }
                return Err(err);
            }
        };

        self.stream_with_mapping(result, &mapping, cancel, sink).await
    }

    /// Streams with a mapping built earlier by [`BatchStreamer::prepare`].
    pub async fn stream_with_mapping<R, T, S>(
        &self,
        result: &mut T,
        mapping: &FieldMapping<R>,
        cancel: &CancellationToken,
        sink: &mut S,
    ) -> Result<StreamSummary, StreamError>
    where
        R: Record,
        T: TabularResult + ?Sized,
        S: Sink<R> + ?Sized,
    {
        let outcome = self.drive(result, mapping, cancel, sink).await;

        match (outcome, result.close().await) {
            (Ok(summary), Ok(())) => Ok(summary),
            (Ok(_), Err(close_err)) => {
                warn!(error = %close_err, "Failed to close tabular result.");
                Err(StreamError::Source(close_err))
            }
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(close_err)) => {
                warn!(error = %close_err, "Failed to close tabular result.");
                Err(err)
            }
        }
    }

    /// Streams the whole result and returns every record in row order.
    pub async fn collect<R, T>(
        &self,
        result: &mut T,
        cancel: &CancellationToken,
    ) -> Result<(Vec<R>, StreamSummary), StreamError>
    where
        R: Record,
        T: TabularResult + ?Sized,
    {
        let mut sink = CollectSink::new();
        let summary = self.stream::<R, T, _>(result, cancel, &mut sink).await?;
        Ok((sink.into_records(), summary))
    }

    async fn drive<R, T, S>(
        &self,
        result: &mut T,
        mapping: &FieldMapping<R>,
        cancel: &CancellationToken,
        sink: &mut S,
    ) -> Result<StreamSummary, StreamError>
    where
        R: Record,
        T: TabularResult + ?Sized,
        S: Sink<R> + ?Sized,
    {
        let mut summary = StreamSummary {
            unmapped: mapping.unmapped().to_vec(),
            ..Default::default()
        };
        if let Some(metrics) = &self.metrics {
            metrics.increment_unmapped(summary.unmapped.len() as u64);
        }

        let mut pending: Vec<R> = Vec::with_capacity(self.batch_size);

        loop {
            if cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            let Some(row) = result.next_row().await? else {
                break;
            };

            let materialized = materialize(mapping, row);
            if let Some(metrics) = &self.metrics {
                metrics.increment_rows(1);
                metrics.increment_conversion_failures(materialized.failures as u64);
            }
            summary.conversion_failures += materialized.failures;
            pending.push(materialized.record);

            if pending.len() >= self.batch_size {
                let records = std::mem::replace(&mut pending, Vec::with_capacity(self.batch_size));
                self.deliver(sink, records, &mut summary).await?;
            }
        }

        if cancel.is_cancelled() {
            summary.cancelled = true;
        }

        if summary.cancelled {
            summary.dropped = pending.len();
            info!(
                batches = summary.batches,
                total = summary.records,
                dropped = summary.dropped,
                "Query is cancelled."
            );
        } else if !pending.is_empty() {
            self.deliver(sink, pending, &mut summary).await?;
        }

        info!(
            batches = summary.batches,
            total = summary.records,
            conversion_failures = summary.conversion_failures,
            "Streaming finished."
        );

        Ok(summary)
    }

    async fn deliver<R, S>(
        &self,
        sink: &mut S,
        records: Vec<R>,
        summary: &mut StreamSummary,
    ) -> Result<(), StreamError>
    where
        R: Record,
        S: Sink<R> + ?Sized,
    {
        let batch_no = summary.batches + 1;
        let batch = Batch::new(&self.run_id, batch_no, records);
        let rows = batch.len();
        let batch_id = batch.id.clone();

        sink.write_batch(batch)
            .await
            .map_err(|source| StreamError::Sink { batch_no, source })?;

        summary.batches = batch_no;
        summary.records += rows;
        if let Some(metrics) = &self.metrics {
            metrics.increment_batches(1);
            metrics.increment_records(rows as u64);
        }

        info!(
            batch_no,
            batch_id = %batch_id,
            rows,
            total = summary.records,
            "Sent batch."
        );

        Ok(())
    }
}
