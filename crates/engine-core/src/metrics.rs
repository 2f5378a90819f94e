use serde::Serialize;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

#[derive(Debug, Default)]
struct InnerMetrics {
    rows_read: AtomicU64,
    records_delivered: AtomicU64,
    batches_delivered: AtomicU64,
    conversion_failures: AtomicU64,
    unmapped_columns: AtomicU64,
}

/// Counters shared by every streamer run that holds a clone.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<InnerMetrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub rows_read: u64,
    pub records_delivered: u64,
    pub batches_delivered: u64,
    pub conversion_failures: u64,
    pub unmapped_columns: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Metrics {
            inner: Arc::new(InnerMetrics::default()),
        }
    }

    pub fn increment_rows(&self, count: u64) {
        self.inner.rows_read.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_records(&self, count: u64) {
        self.inner
            .records_delivered
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_batches(&self, count: u64) {
        self.inner
            .batches_delivered
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_conversion_failures(&self, count: u64) {
        self.inner
            .conversion_failures
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_unmapped(&self, count: u64) {
        self.inner
            .unmapped_columns
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            rows_read: self.inner.rows_read.load(Ordering::Relaxed),
            records_delivered: self.inner.records_delivered.load(Ordering::Relaxed),
            batches_delivered: self.inner.batches_delivered.load(Ordering::Relaxed),
            conversion_failures: self.inner.conversion_failures.load(Ordering::Relaxed),
            unmapped_columns: self.inner.unmapped_columns.load(Ordering::Relaxed),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
