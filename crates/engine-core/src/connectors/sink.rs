use crate::error::SinkError;
use async_trait::async_trait;
use model::records::batch::Batch;
use std::future::Future;

/// Receives batches from a streamer, one at a time and in order.
///
/// The streamer awaits each call before reading further rows, so a slow sink
/// throttles the source.
#[async_trait]
pub trait Sink<R>: Send
where
    R: Send + 'static,
{
    async fn write_batch(&mut self, batch: Batch<R>) -> Result<(), SinkError>;
}

/// Keeps every batch it receives.
#[derive(Debug)]
pub struct CollectSink<R> {
    batches: Vec<Batch<R>>,
}

impl<R> CollectSink<R> {
    pub fn new() -> Self {
        CollectSink {
            batches: Vec::new(),
        }
    }

    pub fn batches(&self) -> &[Batch<R>] {
        &self.batches
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.iter().map(Batch::len).collect()
    }

    pub fn into_records(self) -> Vec<R> {
        self.batches
            .into_iter()
            .flat_map(Batch::into_records)
            .collect()
    }
}

impl<R> Default for CollectSink<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Send + 'static> Sink<R> for CollectSink<R> {
    async fn write_batch(&mut self, batch: Batch<R>) -> Result<(), SinkError> {
        self.batches.push(batch);
        Ok(())
    }
}

/// Adapts an async closure into a sink.
pub struct FnSink<F> {
    f: F,
}

impl<F> FnSink<F> {
    pub fn new(f: F) -> Self {
        FnSink { f }
    }
}

#[async_trait]
impl<R, F, Fut> Sink<R> for FnSink<F>
where
    R: Send + 'static,
    F: FnMut(Batch<R>) -> Fut + Send,
    Fut: Future<Output = Result<(), SinkError>> + Send,
{
    async fn write_batch(&mut self, batch: Batch<R>) -> Result<(), SinkError> {
        (self.f)(batch).await
    }
}
