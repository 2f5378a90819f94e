use crate::{
    error::SourceError,
    metadata::ColumnMetadata,
    tabular::{QuerySource, TabularResult},
};
use async_trait::async_trait;
use model::{
    core::{data_type::DataType, value::Value},
    records::row::Row,
};
use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

/// A tabular result backed by rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryResult {
    columns: Option<Vec<ColumnMetadata>>,
    rows: VecDeque<Row>,
    rows_read: usize,
    closed: bool,
}

impl MemoryResult {
    pub fn new(columns: &[(&str, DataType)], rows: Vec<Vec<Value>>) -> Self {
        let columns = columns
            .iter()
            .enumerate()
            .map(|(ordinal, (name, data_type))| ColumnMetadata::new(*name, *data_type, ordinal))
            .collect();

        MemoryResult {
            columns: Some(columns),
            rows: rows.into_iter().map(Row::new).collect(),
            ..Default::default()
        }
    }

    /// A result whose source cannot describe its columns.
    pub fn without_schema(rows: Vec<Vec<Value>>) -> Self {
        MemoryResult {
            columns: None,
            rows: rows.into_iter().map(Row::new).collect(),
            ..Default::default()
        }
    }

    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[async_trait]
impl TabularResult for MemoryResult {
    fn schema(&self) -> Option<&[ColumnMetadata]> {
        self.columns.as_deref()
    }

    async fn next_row(&mut self) -> Result<Option<Row>, SourceError> {
        if self.closed {
            return Err(SourceError::Closed);
        }

        let row = self.rows.pop_front();
        if row.is_some() {
            self.rows_read += 1;
        }
        Ok(row)
    }

    async fn close(&mut self) -> Result<(), SourceError> {
        self.closed = true;
        self.rows.clear();
        Ok(())
    }
}

/// Serves canned results by query text; every `open` hands out a fresh copy.
#[derive(Debug, Default)]
pub struct MemoryQuerySource {
    results: HashMap<String, MemoryResult>,
    opened: AtomicUsize,
}

impl MemoryQuerySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, query: impl Into<String>, result: MemoryResult) -> Self {
        self.results.insert(query.into(), result);
        self
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::Relaxed)
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl QuerySource for MemoryQuerySource {
    async fn open(&self, query: &str) -> Result<Box<dyn TabularResult>, SourceError> {
        let result = self
            .results
            .get(query)
            .cloned()
            .ok_or_else(|| SourceError::QueryNotFound(query.to_string()))?;

        self.opened.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_result_yields_rows_in_order() {
        let mut result = MemoryResult::new(
            &[("Name", DataType::String), ("Code", DataType::Long)],
            vec![
                vec![Value::from("a"), Value::Long(1)],
                vec![Value::from("b"), Value::Long(2)],
            ],
        );

        let schema = result.schema().unwrap();
        assert_eq!(schema[1].name, "Code");
        assert_eq!(schema[1].ordinal, 1);

        let first = result.next_row().await.unwrap().unwrap();
        assert_eq!(first.get(0), Some(&Value::from("a")));
        assert!(result.next_row().await.unwrap().is_some());
        assert!(result.next_row().await.unwrap().is_none());
        assert_eq!(result.rows_read(), 2);

        result.close().await.unwrap();
        assert!(result.is_closed());
        assert!(matches!(result.next_row().await, Err(SourceError::Closed)));
    }

    #[tokio::test]
    async fn test_query_source_serves_copies() {
        let source = MemoryQuerySource::new().with_result(
            "q",
            MemoryResult::new(&[("Name", DataType::String)], vec![vec![Value::from("x")]]),
        );

        for _ in 0..2 {
            let mut result = source.open("q").await.unwrap();
            assert!(result.next_row().await.unwrap().is_some());
        }
        assert_eq!(source.opened(), 2);
        assert!(matches!(
            source.open("missing").await,
            Err(SourceError::QueryNotFound(_))
        ));
    }
}
