use super::{data_type::DataType, utils, value::Value};
use uuid::Uuid;

/// Names of an enumeration's variants, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: &'static str,
    pub variants: &'static [&'static str],
}

impl EnumDescriptor {
    /// Matches a variant by name ignoring case, or by its ordinal.
    pub fn parse(&self, text: &str) -> Option<&'static str> {
        let text = text.trim();
        if let Some(variant) = self
            .variants
            .iter()
            .copied()
            .find(|variant| variant.eq_ignore_ascii_case(text))
        {
            return Some(variant);
        }

        text.parse::<usize>()
            .ok()
            .and_then(|ordinal| self.variants.get(ordinal).copied())
    }
}

/// Type of a record field as seen by the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Bool,
    Int32,
    Int64,
    Float64,
    DateTime,
    Guid,
    Json,
    Enum(&'static EnumDescriptor),
    StringList,
}

impl FieldType {
    /// Whether values of `source` can be stored without conversion.
    pub fn accepts(&self, source: DataType) -> bool {
        matches!(
            (self, source),
            (FieldType::Bool, DataType::Boolean)
                | (FieldType::Int32, DataType::Int)
                | (FieldType::Int64, DataType::Long)
                | (FieldType::Float64, DataType::Real)
                | (FieldType::String, DataType::String)
                | (FieldType::DateTime, DataType::DateTime)
                | (FieldType::Guid, DataType::Guid)
                | (FieldType::Json, DataType::Dynamic)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Bool => "bool",
            FieldType::Int32 => "int32",
            FieldType::Int64 => "int64",
            FieldType::Float64 => "float64",
            FieldType::DateTime => "datetime",
            FieldType::Guid => "guid",
            FieldType::Json => "json",
            FieldType::Enum(descriptor) => descriptor.name,
            FieldType::StringList => "string list",
        }
    }

    /// Parses text into a value of this field type.
    pub fn parse_text(&self, text: &str) -> Result<Value, String> {
        let invalid = || format!("'{text}' is not a valid {}", self.name());
        let trimmed = text.trim();

        let value = match self {
            FieldType::String => Value::String(text.to_string()),
            FieldType::Bool => Value::Boolean(utils::parse_bool(trimmed).ok_or_else(invalid)?),
            FieldType::Int32 => Value::Int(trimmed.parse().map_err(|_| invalid())?),
            FieldType::Int64 => Value::Long(trimmed.parse().map_err(|_| invalid())?),
            FieldType::Float64 => Value::Real(trimmed.parse().map_err(|_| invalid())?),
            FieldType::DateTime => {
                Value::DateTime(utils::parse_datetime(trimmed).ok_or_else(invalid)?)
            }
            FieldType::Guid => Value::Guid(Uuid::parse_str(trimmed).map_err(|_| invalid())?),
            FieldType::Json => match serde_json::from_str(trimmed) {
                Ok(json) => Value::Dynamic(json),
                Err(_) => Value::Dynamic(serde_json::Value::String(text.to_string())),
            },
            FieldType::Enum(descriptor) => {
                Value::Enum(descriptor.parse(trimmed).ok_or_else(invalid)?.to_string())
            }
            FieldType::StringList => Value::StringList(utils::parse_delimited_list(text)),
        };

        Ok(value)
    }
}

/// One entry of a record's mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub alias: Option<&'static str>,
    /// `ty` is the underlying type of the field.
    pub ty: FieldType,
    /// The field holds an `Option`; blank text reads as null instead of failing to parse.
    pub optional: bool,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            alias: None,
            ty,
            optional: false,
        }
    }

    pub const fn alias(self, alias: &'static str) -> Self {
        Self {
            alias: Some(alias),
            ..self
        }
    }

    pub const fn optional(self) -> Self {
        Self {
            optional: true,
            ..self
        }
    }

    /// Whether `value` should be treated as absent for this field.
    pub fn is_absent(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(text) => self.optional && text.trim().is_empty(),
            _ => false,
        }
    }
}

#[derive(Debug)]
pub struct RecordSchema {
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl RecordSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}
