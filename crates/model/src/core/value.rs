use super::{data_type::DataType, utils};
use bigdecimal::BigDecimal;
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;
use uuid::Uuid;

/// A single cell as produced by a tabular source, or the output of a converter.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    SByte(i8),
    Int(i32),
    Long(i64),
    Real(f64),
    Decimal(BigDecimal),
    String(String),
    DateTime(DateTime<Utc>),
    TimeSpan(TimeDelta),
    Guid(Uuid),
    Dynamic(serde_json::Value),
    /// Canonical variant name produced by the enum converter.
    Enum(String),
    StringList(Vec<String>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The declared source type this value corresponds to, if any.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::SByte(_) => Some(DataType::SByte),
            Value::Int(_) => Some(DataType::Int),
            Value::Long(_) => Some(DataType::Long),
            Value::Real(_) => Some(DataType::Real),
            Value::Decimal(_) => Some(DataType::Decimal),
            Value::String(_) => Some(DataType::String),
            Value::DateTime(_) => Some(DataType::DateTime),
            Value::TimeSpan(_) => Some(DataType::TimeSpan),
            Value::Guid(_) => Some(DataType::Guid),
            Value::Dynamic(_) => Some(DataType::Dynamic),
            Value::Null | Value::Enum(_) | Value::StringList(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Enum(_) => "enum",
            Value::StringList(_) => "string list",
            other => other.data_type().map(|t| t.name()).unwrap_or("unknown"),
        }
    }

    /// Text form used when a value has to be re-parsed into another type.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Boolean(v) => v.to_string(),
            Value::SByte(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Long(v) => v.to_string(),
            Value::Real(v) => v.to_string(),
            Value::Decimal(v) => v.to_string(),
            Value::String(v) | Value::Enum(v) => v.clone(),
            Value::DateTime(v) => v.to_rfc3339(),
            Value::TimeSpan(v) => utils::format_timespan(v),
            Value::Guid(v) => v.to_string(),
            Value::Dynamic(serde_json::Value::String(s)) => s.clone(),
            Value::Dynamic(v) => v.to_string(),
            Value::StringList(items) => serde_json::Value::from(items.clone()).to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            other => f.write_str(&other.to_text()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::SByte(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}
