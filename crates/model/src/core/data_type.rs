use super::{utils, value::Value};
use bigdecimal::BigDecimal;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr};
use uuid::Uuid;

/// Column types a query result can declare in its schema.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    SByte,
    Int,
    Long,
    Real,
    Decimal,
    String,
    DateTime,
    TimeSpan,
    Guid,
    Dynamic,
}

lazy_static! {
    static ref TYPE_NAME_MAP: HashMap<&'static str, DataType> = build_type_name_map();
}

impl DataType {
    /// Resolves an engine type name (`long`, `System.Int64`, `datetime`, ...).
    pub fn from_type_name(type_name: &str) -> Result<Self, String> {
        let normalized = Self::normalize_type_name(type_name);
        TYPE_NAME_MAP
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| format!("Unknown column type: {type_name}"))
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataType::Boolean => "bool",
            DataType::SByte => "sbyte",
            DataType::Int => "int",
            DataType::Long => "long",
            DataType::Real => "real",
            DataType::Decimal => "decimal",
            DataType::String => "string",
            DataType::DateTime => "datetime",
            DataType::TimeSpan => "timespan",
            DataType::Guid => "guid",
            DataType::Dynamic => "dynamic",
        }
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, DataType::String)
    }

    /// Parses a raw text cell into a value of this type.
    pub fn parse_value(&self, raw: &str) -> Result<Value, String> {
        let invalid = || format!("'{raw}' is not a valid {}", self.name());
        let text = raw.trim();

        let value = match self {
            DataType::Boolean => Value::Boolean(utils::parse_bool(text).ok_or_else(invalid)?),
            DataType::SByte => Value::SByte(text.parse().map_err(|_| invalid())?),
            DataType::Int => Value::Int(text.parse().map_err(|_| invalid())?),
            DataType::Long => Value::Long(text.parse().map_err(|_| invalid())?),
            DataType::Real => Value::Real(text.parse().map_err(|_| invalid())?),
            DataType::Decimal => {
                Value::Decimal(BigDecimal::from_str(text).map_err(|_| invalid())?)
            }
            DataType::String => Value::String(raw.to_string()),
            DataType::DateTime => {
                Value::DateTime(utils::parse_datetime(text).ok_or_else(invalid)?)
            }
            DataType::TimeSpan => {
                Value::TimeSpan(utils::parse_timespan(text).ok_or_else(invalid)?)
            }
            DataType::Guid => Value::Guid(Uuid::parse_str(text).map_err(|_| invalid())?),
            DataType::Dynamic => {
                Value::Dynamic(serde_json::from_str(text).map_err(|e| e.to_string())?)
            }
        };

        Ok(value)
    }

    fn normalize_type_name(type_name: &str) -> String {
        let lowered = type_name.trim().to_ascii_lowercase();
        match lowered.strip_prefix("system.") {
            Some(clr_name) => clr_name.to_string(),
            None => lowered,
        }
    }
}

impl TryFrom<&str> for DataType {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        DataType::from_type_name(s)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn build_type_name_map() -> HashMap<&'static str, DataType> {
    let mut map = HashMap::new();

    map.insert("bool", DataType::Boolean);
    map.insert("boolean", DataType::Boolean);
    map.insert("sbyte", DataType::SByte);
    map.insert("int8", DataType::SByte);
    map.insert("int", DataType::Int);
    map.insert("int32", DataType::Int);
    map.insert("long", DataType::Long);
    map.insert("int64", DataType::Long);
    map.insert("real", DataType::Real);
    map.insert("double", DataType::Real);
    map.insert("decimal", DataType::Decimal);
    map.insert("data.sqltypes.sqldecimal", DataType::Decimal);
    map.insert("string", DataType::String);
    map.insert("datetime", DataType::DateTime);
    map.insert("date", DataType::DateTime);
    map.insert("timespan", DataType::TimeSpan);
    map.insert("time", DataType::TimeSpan);
    map.insert("guid", DataType::Guid);
    map.insert("uuid", DataType::Guid);
    map.insert("uniqueid", DataType::Guid);
    map.insert("dynamic", DataType::Dynamic);
    map.insert("json", DataType::Dynamic);
    map.insert("object", DataType::Dynamic);

    map
}
