use crate::{error::SourceError, metadata::ColumnMetadata};
use model::core::data_type::DataType;

/// Builds column metadata from a header row.
///
/// Each header cell is either `name` (a string column) or `name:type` where
/// `type` is any type name [`DataType::from_type_name`] understands.
pub fn columns_from_header(header: &csv::StringRecord) -> Result<Vec<ColumnMetadata>, SourceError> {
    header
        .iter()
        .enumerate()
        .map(|(ordinal, cell)| parse_column(cell, ordinal))
        .collect()
}

fn parse_column(cell: &str, ordinal: usize) -> Result<ColumnMetadata, SourceError> {
    let (name, data_type) = match cell.rsplit_once(':') {
        Some((name, type_name)) => {
            let data_type =
                DataType::from_type_name(type_name).map_err(|reason| SourceError::InvalidColumn {
                    column: cell.to_string(),
                    reason,
                })?;
            (name.trim(), data_type)
        }
        None => (cell.trim(), DataType::String),
    };

    if name.is_empty() {
        return Err(SourceError::InvalidColumn {
            column: cell.to_string(),
            reason: format!("column {ordinal} has no name"),
        });
    }

    Ok(ColumnMetadata::new(name, data_type, ordinal))
}
