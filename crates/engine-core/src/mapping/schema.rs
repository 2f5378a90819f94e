use crate::error::MappingError;
use connectors::{metadata::ColumnMetadata, tabular::TabularResult};
use tracing::debug;

/// Reads the ordered column list of a result.
pub fn resolve_schema<T>(result: &T) -> Result<Vec<ColumnMetadata>, MappingError>
where
    T: TabularResult + ?Sized,
{
    let columns = result.schema().ok_or(MappingError::SchemaUnavailable)?;
    debug!(
        columns = ?columns.iter().map(|c| format!("{}:{}", c.name, c.data_type)).collect::<Vec<_>>(),
        "Resolved result schema."
    );
    Ok(columns.to_vec())
}
