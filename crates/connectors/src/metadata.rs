use model::core::data_type::DataType;
use serde::Serialize;

/// A column of a tabular result as declared by its source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMetadata {
    pub name: String,
    pub data_type: DataType,
    pub ordinal: usize,
}

impl ColumnMetadata {
    pub fn new(name: impl Into<String>, data_type: DataType, ordinal: usize) -> Self {
        ColumnMetadata {
            name: name.into(),
            data_type,
            ordinal,
        }
    }
}
