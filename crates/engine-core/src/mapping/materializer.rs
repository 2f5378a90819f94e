use super::{
    converter::Converter,
    field_mapper::{Conversion, FieldMapping, MappedField},
};
use crate::error::ConversionError;
use model::{
    core::value::Value,
    records::{record::Record, row::Row},
};
use tracing::warn;

/// A record built from one row, with the number of fields left at their
/// default because their value could not be converted or stored.
#[derive(Debug, Clone)]
pub struct Materialized<R> {
    pub record: R,
    pub failures: usize,
}

/// Builds one record from one row.
///
/// Null and missing cells leave the field at its default, as do blank text
/// cells bound to optional fields. Conversion and
/// assignment failures are logged and counted, never returned.
pub fn materialize<R: Record>(mapping: &FieldMapping<R>, mut row: Row) -> Materialized<R> {
    let mut record = mapping.new_record();
    let mut failures = 0;

    for entry in mapping.fields() {
        let value = row.take(entry.column);
        if entry.field.is_absent(&value) {
            continue;
        }

        let converted = match convert(entry, &value) {
            Ok(converted) => converted,
            Err(err) => {
                warn!(
                    record = R::schema().name,
                    field = entry.field.name,
                    column = %entry.column_name,
                    value = %value,
                    error = %err,
                    "Failed to convert type for column."
                );
                failures += 1;
                continue;
            }
        };

        if let Err(err) = record.set_field(entry.field.name, converted) {
            warn!(
                record = R::schema().name,
                field = entry.field.name,
                column = %entry.column_name,
                value = %value,
                error = %err,
                "Failed to assign value to field."
            );
            failures += 1;
        }
    }

    Materialized { record, failures }
}

fn convert(entry: &MappedField, value: &Value) -> Result<Value, ConversionError> {
    match &entry.conversion {
        // Cells whose runtime type differs from the declared one still need
        // coercing even when the declared type is assignable.
        Conversion::PassThrough if value.data_type() == Some(entry.source_type) => Ok(value.clone()),
        Conversion::PassThrough => Converter::fallback(entry.field.ty).apply(value),
        Conversion::Convert(converter) => converter.apply(value),
    }
}
