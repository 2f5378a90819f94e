use crate::error::SinkError;
use async_trait::async_trait;
use futures::lock::Mutex;
use serde_json::Value as Json;
use std::{collections::HashMap, sync::Arc};

/// A named document collection that sync runs write into.
#[async_trait]
pub trait CollectionSink: Send {
    fn collection(&self) -> &str;

    /// Removes every document from the collection.
    async fn clear(&mut self) -> Result<(), SinkError>;

    /// Writes documents and returns how many were stored.
    async fn upsert(&mut self, documents: Vec<Json>) -> Result<usize, SinkError>;
}

/// Opens collection sinks by name.
#[async_trait]
pub trait SinkFactory: Send + Sync {
    async fn open(&self, collection: &str) -> Result<Box<dyn CollectionSink>, SinkError>;
}

type Collections = Arc<Mutex<HashMap<String, Vec<Json>>>>;

/// Collections held in memory. Documents with a string `id` replace earlier
/// documents with the same id; others are appended.
#[derive(Clone, Default)]
pub struct MemorySinkFactory {
    collections: Collections,
}

impl MemorySinkFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn documents(&self, collection: &str) -> Vec<Json> {
        self.collections
            .lock()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn seed(&self, collection: &str, documents: Vec<Json>) {
        self.collections
            .lock()
            .await
            .insert(collection.to_string(), documents);
    }
}

#[async_trait]
impl SinkFactory for MemorySinkFactory {
    async fn open(&self, collection: &str) -> Result<Box<dyn CollectionSink>, SinkError> {
        self.collections
            .lock()
            .await
            .entry(collection.to_string())
            .or_default();

        Ok(Box::new(MemoryCollection {
            name: collection.to_string(),
            collections: self.collections.clone(),
        }))
    }
}

struct MemoryCollection {
    name: String,
    collections: Collections,
}

#[async_trait]
impl CollectionSink for MemoryCollection {
    fn collection(&self) -> &str {
        &self.name
    }

    async fn clear(&mut self) -> Result<(), SinkError> {
        let mut collections = self.collections.lock().await;
        if let Some(documents) = collections.get_mut(&self.name) {
            documents.clear();
        }
        Ok(())
    }

    async fn upsert(&mut self, documents: Vec<Json>) -> Result<usize, SinkError> {
        let mut collections = self.collections.lock().await;
        let stored = collections
            .get_mut(&self.name)
            .ok_or_else(|| SinkError::CollectionNotFound(self.name.clone()))?;

        let count = documents.len();
        for document in documents {
            let id = document.get("id").and_then(Json::as_str).map(str::to_string);
            let existing = id.as_deref().and_then(|id| {
                stored
                    .iter()
                    .position(|doc| doc.get("id").and_then(Json::as_str) == Some(id))
            });

            match existing {
                Some(index) => stored[index] = document,
                None => stored.push(document),
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_collection_upserts_by_id() {
        let factory = MemorySinkFactory::new();
        let mut sink = factory.open("locations").await.unwrap();
        assert_eq!(sink.collection(), "locations");

        let added = sink
            .upsert(vec![json!({"id": "a", "v": 1}), json!({"id": "b", "v": 1})])
            .await
            .unwrap();
        assert_eq!(added, 2);

        sink.upsert(vec![json!({"id": "a", "v": 2}), json!({"v": 3})])
            .await
            .unwrap();

        let docs = factory.documents("locations").await;
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0]["v"], 2);
    }

    #[tokio::test]
    async fn test_clear_empties_collection() {
        let factory = MemorySinkFactory::new();
        factory.seed("events", vec![json!({"v": 1})]).await;

        let mut sink = factory.open("events").await.unwrap();
        sink.clear().await.unwrap();
        assert!(factory.documents("events").await.is_empty());
    }
}
