pub mod converter;
pub mod field_mapper;
pub mod materializer;
pub mod schema;

pub use converter::{ConversionRule, Converter, ConverterRegistry};
pub use field_mapper::{Conversion, FieldMapper, FieldMapping, MappedField};
pub use materializer::{Materialized, materialize};
pub use schema::resolve_schema;
