use async_trait::async_trait;
use engine_core::{
    connectors::destination::{CollectionSink, SinkFactory},
    error::SinkError,
};
use serde_json::Value as Json;
use std::path::{Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

/// Writes each collection to `<dir>/<collection>.jsonl`, one document per line.
#[derive(Debug, Clone)]
pub struct JsonLinesSinkFactory {
    dir: PathBuf,
}

impl JsonLinesSinkFactory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonLinesSinkFactory { dir: dir.into() }
    }

    pub fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.jsonl"))
    }
}

#[async_trait]
impl SinkFactory for JsonLinesSinkFactory {
    async fn open(&self, collection: &str) -> Result<Box<dyn CollectionSink>, SinkError> {
        fs::create_dir_all(&self.dir).await?;
        Ok(Box::new(JsonLinesSink::new(collection, self.path_for(collection))))
    }
}

/// Appends documents to a JSON lines file.
#[derive(Debug, Clone)]
pub struct JsonLinesSink {
    collection: String,
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new(collection: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        JsonLinesSink {
            collection: collection.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CollectionSink for JsonLinesSink {
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn clear(&mut self) -> Result<(), SinkError> {
        fs::write(&self.path, b"").await?;
        debug!(collection = %self.collection, path = %self.path.display(), "Cleared collection.");
        Ok(())
    }

    async fn upsert(&mut self, documents: Vec<Json>) -> Result<usize, SinkError> {
        let mut buf = Vec::new();
        for document in &documents {
            serde_json::to_writer(&mut buf, document)?;
            buf.push(b'\n');
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&buf).await?;
        file.flush().await?;

        Ok(documents.len())
    }
}
