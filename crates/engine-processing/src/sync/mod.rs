pub mod ingest;
pub mod worker;

pub use worker::{SyncWorker, TableReport};
