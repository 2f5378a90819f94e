use crate::core::{field::RecordSchema, value::Value};
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Expected {expected} value, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Invalid {target} value: {value}")]
    InvalidValue { target: &'static str, value: String },
}

/// A record type that rows can be materialized into.
///
/// `schema()` is the explicit mapping table the field mapper resolves columns
/// against. `new_empty()` is the zero-argument constructor; returning `None`
/// marks a type that cannot be materialized.
pub trait Record: Clone + Send + Sync + 'static {
    fn schema() -> &'static RecordSchema;

    fn new_empty() -> Option<Self>;

    fn set_field(&mut self, field: &str, value: Value) -> Result<(), FieldError>;
}

/// Extracts a typed field value out of a converted [`Value`].
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, FieldError>;
}

macro_rules! impl_from_value {
    ($ty:ty, $variant:ident, $expected:literal) => {
        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, FieldError> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(FieldError::TypeMismatch {
                        expected: $expected,
                        actual: other.type_name(),
                    }),
                }
            }
        }
    };
}

impl_from_value!(String, String, "string");
impl_from_value!(bool, Boolean, "bool");
impl_from_value!(i32, Int, "int32");
impl_from_value!(i64, Long, "int64");
impl_from_value!(f64, Real, "float64");
impl_from_value!(DateTime<Utc>, DateTime, "datetime");
impl_from_value!(Uuid, Guid, "guid");
impl_from_value!(serde_json::Value, Dynamic, "json");
impl_from_value!(Vec<String>, StringList, "string list");

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, FieldError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Declares a field enumeration with case-insensitive parsing, a `Default` on
/// the first variant and an `EnumDescriptor` for the field mapper.
#[macro_export]
macro_rules! record_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $first:ident $(, $rest:ident)* $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
            serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            #[default]
            $first,
            $($rest,)*
        }

        impl $name {
            pub const VARIANTS: &'static [&'static str] =
                &[stringify!($first), $(stringify!($rest),)*];

            pub const DESCRIPTOR: $crate::core::field::EnumDescriptor =
                $crate::core::field::EnumDescriptor {
                    name: stringify!($name),
                    variants: Self::VARIANTS,
                };

            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::$first => stringify!($first),
                    $($name::$rest => stringify!($rest),)*
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match Self::DESCRIPTOR.parse(s) {
                    Some(stringify!($first)) => Ok($name::$first),
                    $(Some(stringify!($rest)) => Ok($name::$rest),)*
                    _ => Err(format!("Unknown {} value: {s}", stringify!($name))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::records::record::FromValue for $name {
            fn from_value(
                value: $crate::core::value::Value,
            ) -> Result<Self, $crate::records::record::FieldError> {
                match value {
                    $crate::core::value::Value::Enum(text)
                    | $crate::core::value::Value::String(text) => text.parse().map_err(|_| {
                        $crate::records::record::FieldError::InvalidValue {
                            target: stringify!($name),
                            value: text,
                        }
                    }),
                    other => Err($crate::records::record::FieldError::TypeMismatch {
                        expected: stringify!($name),
                        actual: other.type_name(),
                    }),
                }
            }
        }
    };
}
