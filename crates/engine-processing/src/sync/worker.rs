use super::ingest::IngestSink;
use crate::{error::SyncError, producer::BatchStreamer};
use connectors::tabular::QuerySource;
use engine_config::settings::{SyncSettings, TableSync};
use engine_core::{
    connectors::destination::{CollectionSink, SinkFactory},
    metrics::Metrics,
};
use model::{
    entities::{DataCenter, DcRank, DeviceLocation, ModelKind, PowerDevice, PowerDeviceEvent},
    records::record::Record,
};
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// What one table sync did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub model: String,
    pub collection: String,
    pub queries: usize,
    pub batches: usize,
    /// Records read from the source and handed to the collection.
    pub found: usize,
    /// Records the collection reported as stored.
    pub ingested: usize,
    pub conversion_failures: usize,
    pub unmapped: Vec<String>,
    pub cancelled: bool,
}

impl TableReport {
    fn new(kind: ModelKind, table: &TableSync) -> Self {
        TableReport {
            model: kind.key().to_string(),
            collection: table.collection.clone(),
            queries: 0,
            batches: 0,
            found: 0,
            ingested: 0,
            conversion_failures: 0,
            unmapped: Vec::new(),
            cancelled: false,
        }
    }
}

/// Runs every configured table sync: query the source, map rows onto the
/// table's model and write them into its collection.
pub struct SyncWorker {
    settings: SyncSettings,
    source: Arc<dyn QuerySource>,
    sinks: Arc<dyn SinkFactory>,
    metrics: Metrics,
}

impl SyncWorker {
    pub fn new(settings: SyncSettings, source: Arc<dyn QuerySource>, sinks: Arc<dyn SinkFactory>) -> Self {
        SyncWorker {
            settings,
            source,
            sinks,
            metrics: Metrics::new(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub async fn run(&self, cancel: &CancellationToken) -> Result<Vec<TableReport>, SyncError> {
        let mut reports = Vec::with_capacity(self.settings.tables.len());

        for table in &self.settings.tables {
            if cancel.is_cancelled() {
                info!("Sync cancelled, skipping remaining tables.");
                break;
            }
            reports.push(self.sync_table(table, cancel).await?);
        }

        info!(tables = reports.len(), "Sync finished.");
        Ok(reports)
    }

    pub async fn sync_table(&self, table: &TableSync, cancel: &CancellationToken) -> Result<TableReport, SyncError> {
        let kind = ModelKind::from_key(&table.model)
            .ok_or_else(|| SyncError::UnsupportedModel(table.model.clone()))?;
        let queries = self.queries_for(table)?;

        info!(model = %kind, collection = %table.collection, "Syncing table.");

        let target_err = |source| SyncError::Target {
            collection: table.collection.clone(),
            source,
        };
        let mut target = self.sinks.open(&table.collection).await.map_err(target_err)?;
        if table.clear_target {
            target.clear().await.map_err(target_err)?;
            info!(collection = %table.collection, "Cleared target collection.");
        }

        let mut report = TableReport::new(kind, table);
        for query in &queries {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            self.run_query(kind, query, target.as_mut(), cancel, &mut report)
                .await?;
            if report.cancelled {
                break;
            }
        }

        info!(
            model = %kind,
            found = report.found,
            added = report.ingested,
            cancelled = report.cancelled,
            "Table sync complete."
        );
        Ok(report)
    }

    fn queries_for(&self, table: &TableSync) -> Result<Vec<String>, SyncError> {
        if table.split_by_dc && self.settings.data_centers.is_empty() {
            return Err(SyncError::NoDataCenters(table.collection.clone()));
        }
        Ok(table.queries(&self.settings.data_centers))
    }

    async fn run_query(
        &self,
        kind: ModelKind,
        query: &str,
        target: &mut dyn CollectionSink,
        cancel: &CancellationToken,
        report: &mut TableReport,
    ) -> Result<(), SyncError> {
        match kind {
            ModelKind::PowerDevice => self.ingest::<PowerDevice>(kind, query, target, cancel, report).await,
            ModelKind::PowerDeviceEvent => {
                self.ingest::<PowerDeviceEvent>(kind, query, target, cancel, report).await
            }
            ModelKind::DcRank => self.ingest::<DcRank>(kind, query, target, cancel, report).await,
            ModelKind::DeviceLocation => {
                self.ingest::<DeviceLocation>(kind, query, target, cancel, report).await
            }
            ModelKind::DataCenter => self.ingest::<DataCenter>(kind, query, target, cancel, report).await,
        }
    }

    async fn ingest<R>(
        &self,
        kind: ModelKind,
        query: &str,
        target: &mut dyn CollectionSink,
        cancel: &CancellationToken,
        report: &mut TableReport,
    ) -> Result<(), SyncError>
    where
        R: Record + Serialize,
    {
        info!(model = %kind, query, "Running query.");

        let mut result = self.source.open(query).await.map_err(|source| SyncError::Query {
            query: query.to_string(),
            source,
        })?;

        let streamer = BatchStreamer::new(self.settings.batch_size)
            .map_err(|source| SyncError::Stream {
                query: query.to_string(),
                source,
            })?
            .with_metrics(self.metrics.clone());

        let mut sink = IngestSink::new(kind, target);
        let summary = streamer
            .stream::<R, _, _>(result.as_mut(), cancel, &mut sink)
            .await
            .map_err(|source| SyncError::Stream {
                query: query.to_string(),
                source,
            })?;

        report.queries += 1;
        report.batches += summary.batches;
        report.found += sink.found();
        report.ingested += sink.ingested();
        report.conversion_failures += summary.conversion_failures;
        for column in summary.unmapped {
            if !report.unmapped.contains(&column) {
                report.unmapped.push(column);
            }
        }
        report.cancelled |= summary.cancelled;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectors::memory::{MemoryQuerySource, MemoryResult};
    use engine_core::connectors::destination::MemorySinkFactory;
    use model::core::{data_type::DataType, value::Value};
    use serde_json::json;

    fn settings(tables: Vec<TableSync>) -> SyncSettings {
        SyncSettings {
            batch_size: 2,
            data_centers: vec!["AMS01".into(), "DUB02".into()],
            tables,
            ..Default::default()
        }
    }

    fn table(model: &str, query: &str, collection: &str) -> TableSync {
        TableSync {
            query: query.into(),
            model: model.into(),
            collection: collection.into(),
            clear_target: false,
            split_by_dc: false,
        }
    }

    fn ranks(dc: &str, count: usize) -> MemoryResult {
        let rows = (0..count)
            .map(|i| vec![Value::from(dc), Value::from(format!("rack-{i}"))])
            .collect();
        MemoryResult::new(&[("DcName", DataType::String), ("Rack", DataType::String)], rows)
    }

    #[tokio::test]
    async fn test_syncs_table_into_collection() {
        let source = MemoryQuerySource::new().with_result("ranks", ranks("AMS01", 3));
        let sinks = MemorySinkFactory::new();
        let worker = SyncWorker::new(
            settings(vec![table("dcrank", "ranks", "ranks")]),
            source.shared(),
            Arc::new(sinks.clone()),
        );

        let reports = worker.run(&CancellationToken::new()).await.unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].model, "DcRank");
        assert_eq!(reports[0].batches, 2);
        assert_eq!(reports[0].found, 3);
        assert_eq!(reports[0].ingested, 3);

        let docs = sinks.documents("ranks").await;
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0]["DcName"], "AMS01");
        assert_eq!(docs[2]["rack"], "rack-2");
        assert_eq!(worker.metrics().snapshot().records_delivered, 3);
    }

    #[tokio::test]
    async fn test_split_by_dc_runs_once_per_data_center() {
        let source = MemoryQuerySource::new()
            .with_result("ranks_AMS01", ranks("AMS01", 1))
            .with_result("ranks_DUB02", ranks("DUB02", 2));
        let sinks = MemorySinkFactory::new();
        let mut split = table("DcRank", "ranks_{dc}", "ranks");
        split.split_by_dc = true;

        let worker = SyncWorker::new(settings(vec![split]), source.shared(), Arc::new(sinks.clone()));
        let reports = worker.run(&CancellationToken::new()).await.unwrap();

        assert_eq!(reports[0].queries, 2);
        assert_eq!(reports[0].found, 3);
        let docs = sinks.documents("ranks").await;
        assert_eq!(docs[0]["DcName"], "AMS01");
        assert_eq!(docs[2]["DcName"], "DUB02");
    }

    #[tokio::test]
    async fn test_clear_target_removes_previous_documents() {
        let source = MemoryQuerySource::new().with_result("ranks", ranks("AMS01", 1));
        let sinks = MemorySinkFactory::new();
        sinks.seed("ranks", vec![json!({"stale": true})]).await;

        let mut clearing = table("DcRank", "ranks", "ranks");
        clearing.clear_target = true;
        let worker = SyncWorker::new(settings(vec![clearing]), source.shared(), Arc::new(sinks.clone()));
        worker.run(&CancellationToken::new()).await.unwrap();

        let docs = sinks.documents("ranks").await;
        assert_eq!(docs.len(), 1);
        assert!(docs[0].get("stale").is_none());
    }

    #[tokio::test]
    async fn test_unknown_model_is_fatal() {
        let worker = SyncWorker::new(
            settings(vec![table("Rack", "ranks", "ranks")]),
            MemoryQuerySource::new().shared(),
            Arc::new(MemorySinkFactory::new()),
        );

        let err = worker.run(&CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, SyncError::UnsupportedModel(model) if model == "Rack"));
    }

    #[tokio::test]
    async fn test_missing_query_is_reported() {
        let worker = SyncWorker::new(
            settings(vec![table("DcRank", "missing", "ranks")]),
            MemoryQuerySource::new().shared(),
            Arc::new(MemorySinkFactory::new()),
        );

        let err = worker.run(&CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, SyncError::Query { query, .. } if query == "missing"));
    }

    #[tokio::test]
    async fn test_split_without_data_centers_is_fatal() {
        let mut split = table("DcRank", "ranks_{dc}", "ranks");
        split.split_by_dc = true;
        let mut settings = settings(vec![split]);
        settings.data_centers.clear();

        let worker = SyncWorker::new(
            settings,
            MemoryQuerySource::new().shared(),
            Arc::new(MemorySinkFactory::new()),
        );

        let err = worker.run(&CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, SyncError::NoDataCenters(collection) if collection == "ranks"));
    }

    #[tokio::test]
    async fn test_cancelled_run_skips_tables() {
        let source = MemoryQuerySource::new().with_result("ranks", ranks("AMS01", 1));
        let worker = SyncWorker::new(
            settings(vec![table("DcRank", "ranks", "ranks")]),
            source.shared(),
            Arc::new(MemorySinkFactory::new()),
        );

        let token = CancellationToken::new();
        token.cancel();
        let reports = worker.run(&token).await.unwrap();
        assert!(reports.is_empty());
    }
}
