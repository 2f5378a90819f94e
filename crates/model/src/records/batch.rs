use chrono::{DateTime, Utc};

/// Records handed to a sink in one call.
#[derive(Debug, Clone)]
pub struct Batch<R> {
    pub id: String,
    /// 1-based position of the batch within its run.
    pub seq: usize,
    pub records: Vec<R>,
    pub ts: DateTime<Utc>,
}

impl<R> Batch<R> {
    pub fn new(run_id: &str, seq: usize, records: Vec<R>) -> Self {
        Batch {
            id: make_batch_id(run_id, seq),
            seq,
            records,
            ts: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}

pub fn make_batch_id(run_id: &str, seq: usize) -> String {
    let mut h = blake3::Hasher::new();
    h.update(run_id.as_bytes());
    h.update(&seq.to_le_bytes());
    h.finalize().to_hex().to_string()
}
