use super::converter::{Converter, ConverterRegistry};
use crate::error::MappingError;
use connectors::metadata::ColumnMetadata;
use model::{
    core::{
        data_type::DataType,
        field::{FieldDescriptor, RecordSchema},
    },
    records::record::Record,
};
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub enum Conversion {
    PassThrough,
    Convert(Converter),
}

/// A result column bound to a record field.
#[derive(Debug, Clone)]
pub struct MappedField {
    pub column: usize,
    pub column_name: String,
    pub source_type: DataType,
    pub field: &'static FieldDescriptor,
    pub conversion: Conversion,
}

/// Column-to-field bindings for one result and one record type.
///
/// Built once before streaming and read-only afterwards. Holding a mapping
/// proves the record type could be constructed.
#[derive(Debug, Clone)]
pub struct FieldMapping<R> {
    template: R,
    fields: Vec<MappedField>,
    unmapped: Vec<String>,
}

impl<R: Record> FieldMapping<R> {
    pub fn fields(&self) -> &[MappedField] {
        &self.fields
    }

    /// Names of result columns that matched no field.
    pub fn unmapped(&self) -> &[String] {
        &self.unmapped
    }

    pub fn field_for_column(&self, column_name: &str) -> Option<&MappedField> {
        self.fields.iter().find(|f| f.column_name == column_name)
    }

    /// A record with every field at its default.
    pub fn new_record(&self) -> R {
        self.template.clone()
    }
}

/// Resolves column names to record fields and picks converters.
#[derive(Debug, Clone, Default)]
pub struct FieldMapper {
    registry: Arc<ConverterRegistry>,
}

impl FieldMapper {
    pub fn new(registry: Arc<ConverterRegistry>) -> Self {
        FieldMapper { registry }
    }

    pub fn build<R: Record>(&self, columns: &[ColumnMetadata]) -> Result<FieldMapping<R>, MappingError> {
        let schema = R::schema();
        let template = R::new_empty().ok_or(MappingError::MissingConstructor(schema.name))?;
        let lookup = FieldLookup::new(schema);

        let mut fields = Vec::with_capacity(columns.len());
        let mut unmapped = Vec::new();

        for (column, meta) in columns.iter().enumerate() {
            let Some(field) = lookup.resolve(&meta.name) else {
                warn!(record = schema.name, column = %meta.name, "Missing mapping for field.");
                unmapped.push(meta.name.clone());
                continue;
            };

            let conversion = self.conversion_for(meta.data_type, field);
            debug!(
                record = schema.name,
                column = %meta.name,
                field = field.name,
                source_type = %meta.data_type,
                conversion = ?conversion,
                "Mapped column."
            );

            fields.push(MappedField {
                column,
                column_name: meta.name.clone(),
                source_type: meta.data_type,
                field,
                conversion,
            });
        }

        Ok(FieldMapping {
            template,
            fields,
            unmapped,
        })
    }

    fn conversion_for(&self, source: DataType, field: &FieldDescriptor) -> Conversion {
        if field.ty.accepts(source) {
            return Conversion::PassThrough;
        }

        let converter = self
            .registry
            .select(source, field.ty)
            .unwrap_or_else(|| Converter::fallback(field.ty));
        Conversion::Convert(converter)
    }
}

/// Name lookup over a record schema: exact field name first, then alias and
/// field name ignoring case.
struct FieldLookup {
    fields: &'static [FieldDescriptor],
    by_alias: HashMap<String, &'static FieldDescriptor>,
    by_name: HashMap<String, &'static FieldDescriptor>,
}

impl FieldLookup {
    fn new(schema: &'static RecordSchema) -> Self {
        let mut by_alias = HashMap::new();
        let mut by_name = HashMap::new();

        for field in schema.fields {
            if let Some(alias) = field.alias {
                by_alias.entry(alias.to_ascii_lowercase()).or_insert(field);
            }
            by_name.entry(field.name.to_ascii_lowercase()).or_insert(field);
        }

        FieldLookup {
            fields: schema.fields,
            by_alias,
            by_name,
        }
    }

    fn resolve(&self, column: &str) -> Option<&'static FieldDescriptor> {
        if let Some(field) = self.fields.iter().find(|f| f.name == column) {
            return Some(field);
        }

        let key = column.to_ascii_lowercase();
        self.by_alias
            .get(&key)
            .or_else(|| self.by_name.get(&key))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{
        core::{field::FieldType, value::Value},
        entities::{DataCenter, DeviceLocation, PowerDevice, PowerDeviceEvent},
        records::record::FieldError,
    };
    use tracing_test::traced_test;

    fn columns(defs: &[(&str, DataType)]) -> Vec<ColumnMetadata> {
        defs.iter()
            .enumerate()
            .map(|(i, (name, ty))| ColumnMetadata::new(*name, *ty, i))
            .collect()
    }

    #[test]
    fn test_resolves_exact_then_case_insensitive_names() {
        let mapping = FieldMapper::default()
            .build::<PowerDevice>(&columns(&[
                ("DeviceName", DataType::String),
                ("dcname", DataType::String),
                ("DCCODE", DataType::Long),
            ]))
            .unwrap();

        let names: Vec<_> = mapping.fields().iter().map(|f| f.field.name).collect();
        assert_eq!(names, vec!["DeviceName", "DcName", "DcCode"]);
        assert!(mapping.unmapped().is_empty());
    }

    #[test]
    fn test_aliases_win_over_other_field_names() {
        let mapping = FieldMapper::default()
            .build::<DataCenter>(&columns(&[
                ("dcName", DataType::String),
                ("DcName", DataType::String),
                ("DCLONGNAME", DataType::String),
            ]))
            .unwrap();

        let names: Vec<_> = mapping.fields().iter().map(|f| f.field.name).collect();
        assert_eq!(names, vec!["DcShortName", "DcName", "DcName"]);
    }

    #[test]
    fn test_alias_resolution() {
        let mapping = FieldMapper::default()
            .build::<DeviceLocation>(&columns(&[("id", DataType::String)]))
            .unwrap();
        assert_eq!(mapping.fields()[0].field.name, "DeviceName");

        let mapping = FieldMapper::default()
            .build::<PowerDeviceEvent>(&columns(&[("TIMESTAMP", DataType::DateTime)]))
            .unwrap();
        assert_eq!(mapping.fields()[0].field.name, "TimeStamp");
        assert!(matches!(mapping.fields()[0].conversion, Conversion::PassThrough));
    }

    #[traced_test]
    #[test]
    fn test_unmapped_columns_are_reported() {
        let mapping = FieldMapper::default()
            .build::<DeviceLocation>(&columns(&[
                ("Rogue", DataType::String),
                ("DcName", DataType::String),
            ]))
            .unwrap();

        assert_eq!(mapping.unmapped(), &["Rogue".to_string()]);
        assert_eq!(mapping.fields().len(), 1);
        assert_eq!(mapping.fields()[0].column, 1);
        assert!(logs_contain("Missing mapping for field."));
    }

    #[test]
    fn test_converter_selection() {
        let mapping = FieldMapper::default()
            .build::<PowerDevice>(&columns(&[
                ("DeviceName", DataType::String),
                ("IsMonitorable", DataType::SByte),
                ("CopaConfigType", DataType::String),
                ("DcCode", DataType::Int),
                ("AmpRating", DataType::Decimal),
            ]))
            .unwrap();

        let conversion = |name: &str| match &mapping.field_for_column(name).unwrap().conversion {
            Conversion::PassThrough => "pass",
            Conversion::Convert(c) => c.name(),
        };

        assert_eq!(conversion("DeviceName"), "pass");
        assert_eq!(conversion("IsMonitorable"), "bool");
        assert_eq!(conversion("CopaConfigType"), "enum");
        assert_eq!(conversion("DcCode"), "fallback");
        assert_eq!(conversion("AmpRating"), "fallback");
    }

    #[derive(Debug, Clone)]
    struct NoConstructor;

    impl Record for NoConstructor {
        fn schema() -> &'static RecordSchema {
            static FIELDS: [FieldDescriptor; 1] = [FieldDescriptor::new("Name", FieldType::String)];
            static SCHEMA: RecordSchema = RecordSchema {
                name: "NoConstructor",
                fields: &FIELDS,
            };
            &SCHEMA
        }

        fn new_empty() -> Option<Self> {
            None
        }

        fn set_field(&mut self, field: &str, _value: Value) -> Result<(), FieldError> {
            Err(FieldError::UnknownField(field.to_string()))
        }
    }

    #[test]
    fn test_missing_constructor_fails_the_build() {
        let err = FieldMapper::default()
            .build::<NoConstructor>(&columns(&[("Name", DataType::String)]))
            .unwrap_err();
        assert_eq!(err, MappingError::MissingConstructor("NoConstructor"));
    }
}
