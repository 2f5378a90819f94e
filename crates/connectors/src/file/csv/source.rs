use super::metadata::columns_from_header;
use crate::{
    error::SourceError,
    metadata::ColumnMetadata,
    tabular::{QuerySource, TabularResult},
};
use async_trait::async_trait;
use model::{core::value::Value, records::row::Row};
use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// A tabular result read from CSV with a typed header row.
///
/// Empty cells are null. A cell that does not parse as its column's declared
/// type is logged and read as null.
pub struct CsvResult<R: Read + Send = File> {
    name: String,
    reader: Option<csv::Reader<R>>,
    columns: Vec<ColumnMetadata>,
    record: csv::StringRecord,
    rows_read: usize,
}

impl CsvResult<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_reader(file, path.display().to_string())
    }
}

impl<R: Read + Send> CsvResult<R> {
    pub fn from_reader(reader: R, name: impl Into<String>) -> Result<Self, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let columns = columns_from_header(reader.headers()?)?;
        let name = name.into();

        debug!(source = %name, columns = columns.len(), "Opened CSV result.");

        Ok(CsvResult {
            name,
            reader: Some(reader),
            columns,
            record: csv::StringRecord::new(),
            rows_read: 0,
        })
    }

    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }

    fn decode(&self) -> Row {
        let values = self
            .columns
            .iter()
            .map(|column| {
                let cell = self.record.get(column.ordinal).unwrap_or("");
                if cell.is_empty() {
                    return Value::Null;
                }
                column.data_type.parse_value(cell).unwrap_or_else(|err| {
                    warn!(
                        source = %self.name,
                        row = self.rows_read,
                        column = %column.name,
                        error = %err,
                        "Unreadable cell, using null."
                    );
                    Value::Null
                })
            })
            .collect();

        Row::new(values)
    }
}

#[async_trait]
impl<R: Read + Send> TabularResult for CsvResult<R> {
    fn schema(&self) -> Option<&[ColumnMetadata]> {
        Some(&self.columns)
    }

    async fn next_row(&mut self) -> Result<Option<Row>, SourceError> {
        let reader = self.reader.as_mut().ok_or(SourceError::Closed)?;
        if !reader.read_record(&mut self.record)? {
            return Ok(None);
        }

        self.rows_read += 1;
        Ok(Some(self.decode()))
    }

    async fn close(&mut self) -> Result<(), SourceError> {
        if self.reader.take().is_some() {
            debug!(source = %self.name, rows = self.rows_read, "Closed CSV result.");
        }
        Ok(())
    }
}

/// Treats each query as the path of a CSV file under a base directory.
#[derive(Debug, Clone)]
pub struct CsvQuerySource {
    base_dir: PathBuf,
}

impl CsvQuerySource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        CsvQuerySource {
            base_dir: base_dir.into(),
        }
    }

    pub fn resolve(&self, query: &str) -> PathBuf {
        self.base_dir.join(query.trim())
    }
}

#[async_trait]
impl QuerySource for CsvQuerySource {
    async fn open(&self, query: &str) -> Result<Box<dyn TabularResult>, SourceError> {
        let path = self.resolve(query);
        if !tokio::fs::try_exists(&path).await? {
            return Err(SourceError::QueryNotFound(path.display().to_string()));
        }

        let result = CsvResult::open(&path)?;
        Ok(Box::new(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::data_type::DataType;
    use std::io::Write;
    use tracing_test::traced_test;

    const DEVICES: &str = "DeviceName,DcCode:long,IsMonitorable:bool\n\
                           UPS-1,7,true\n\
                           PDU-1,,false\n";

    #[tokio::test]
    async fn test_reads_typed_rows() {
        let mut result = CsvResult::from_reader(DEVICES.as_bytes(), "devices").unwrap();

        let schema = result.schema().unwrap();
        assert_eq!(schema[1].data_type, DataType::Long);

        let first = result.next_row().await.unwrap().unwrap();
        assert_eq!(
            first.into_values(),
            vec![Value::from("UPS-1"), Value::Long(7), Value::Boolean(true)]
        );

        let second = result.next_row().await.unwrap().unwrap();
        assert_eq!(second.get(1), Some(&Value::Null));

        assert!(result.next_row().await.unwrap().is_none());
        assert_eq!(result.rows_read(), 2);

        result.close().await.unwrap();
        assert!(result.is_closed());
        assert!(matches!(result.next_row().await, Err(SourceError::Closed)));
    }

    #[traced_test]
    #[tokio::test]
    async fn test_unparseable_cell_becomes_null() {
        let data = "Name,Code:int\nA,twelve\n";
        let mut result = CsvResult::from_reader(data.as_bytes(), "bad").unwrap();

        let row = result.next_row().await.unwrap().unwrap();
        assert_eq!(row.get(0), Some(&Value::from("A")));
        assert_eq!(row.get(1), Some(&Value::Null));
        assert!(logs_contain("Unreadable cell, using null."));
    }

    #[tokio::test]
    async fn test_query_source_opens_files_under_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = File::create(dir.path().join("devices.csv")).unwrap();
        file.write_all(DEVICES.as_bytes()).unwrap();

        let source = CsvQuerySource::new(dir.path());
        let mut result = source.open(" devices.csv ").await.unwrap();
        assert!(result.next_row().await.unwrap().is_some());

        assert!(matches!(
            source.open("missing.csv").await,
            Err(SourceError::QueryNotFound(_))
        ));
    }
}
