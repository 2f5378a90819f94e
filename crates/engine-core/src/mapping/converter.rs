use crate::error::ConversionError;
use model::core::{
    data_type::DataType,
    field::{EnumDescriptor, FieldType},
    utils::parse_delimited_list,
    value::Value,
};
use std::{fmt, sync::Arc};

type ConvertFn = dyn Fn(&Value) -> Result<Value, ConversionError> + Send + Sync;

/// A pure value transformation attached to one mapped field.
#[derive(Clone)]
pub struct Converter {
    name: &'static str,
    func: Arc<ConvertFn>,
}

impl Converter {
    pub fn new<F>(name: &'static str, func: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        Converter {
            name,
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, value: &Value) -> Result<Value, ConversionError> {
        (self.func)(value)
    }

    /// Renders the value as text and parses that into `target`.
    pub fn fallback(target: FieldType) -> Self {
        Converter::new("fallback", move |value| {
            let text = value.to_text();
            target
                .parse_text(&text)
                .map_err(|reason| ConversionError::Parse {
                    value: text,
                    target: target.name(),
                    reason,
                })
        })
    }

    pub fn enum_from_text(descriptor: &'static EnumDescriptor) -> Self {
        Converter::new("enum", move |value| match value {
            Value::String(text) => descriptor
                .parse(text)
                .map(|variant| Value::Enum(variant.to_string()))
                .ok_or_else(|| ConversionError::Parse {
                    value: text.clone(),
                    target: descriptor.name,
                    reason: format!("expected one of {}", descriptor.variants.join(", ")),
                }),
            other => Err(ConversionError::UnexpectedValue {
                converter: "enum",
                actual: other.type_name(),
            }),
        })
    }

    pub fn bool_from_int() -> Self {
        Converter::new("bool", |value| match value {
            Value::SByte(v) => Ok(Value::Boolean(*v != 0)),
            Value::Int(v) => Ok(Value::Boolean(*v != 0)),
            Value::Long(v) => Ok(Value::Boolean(*v != 0)),
            Value::Boolean(v) => Ok(Value::Boolean(*v)),
            other => Err(ConversionError::UnexpectedValue {
                converter: "bool",
                actual: other.type_name(),
            }),
        })
    }

    pub fn list_from_text() -> Self {
        Converter::new("list", |value| match value {
            Value::String(text) => Ok(Value::StringList(parse_delimited_list(text))),
            other => Err(ConversionError::UnexpectedValue {
                converter: "list",
                actual: other.type_name(),
            }),
        })
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter").field("name", &self.name).finish()
    }
}

/// Picks a converter for a (declared source type, field type) pair.
pub trait ConversionRule: Send + Sync {
    fn select(&self, source: DataType, target: FieldType) -> Option<Converter>;
}

impl<F> ConversionRule for F
where
    F: Fn(DataType, FieldType) -> Option<Converter> + Send + Sync,
{
    fn select(&self, source: DataType, target: FieldType) -> Option<Converter> {
        self(source, target)
    }
}

/// Text into an enumeration, matched by variant name ignoring case.
pub struct EnumFromText;

impl ConversionRule for EnumFromText {
    fn select(&self, source: DataType, target: FieldType) -> Option<Converter> {
        match target {
            FieldType::Enum(descriptor) if source.is_textual() => {
                Some(Converter::enum_from_text(descriptor))
            }
            _ => None,
        }
    }
}

/// 8-bit integers into booleans, nonzero being true.
pub struct BoolFromSByte;

impl ConversionRule for BoolFromSByte {
    fn select(&self, source: DataType, target: FieldType) -> Option<Converter> {
        (target == FieldType::Bool && source == DataType::SByte).then(Converter::bool_from_int)
    }
}

/// Bracketed, comma separated text into a list of strings.
pub struct ListFromText;

impl ConversionRule for ListFromText {
    fn select(&self, source: DataType, target: FieldType) -> Option<Converter> {
        (target == FieldType::StringList && source.is_textual()).then(Converter::list_from_text)
    }
}

/// Ordered conversion rules. Rules added with [`ConverterRegistry::with_rule`]
/// are consulted before the built-in ones.
pub struct ConverterRegistry {
    custom: Vec<Box<dyn ConversionRule>>,
    builtin: Vec<Box<dyn ConversionRule>>,
}

impl ConverterRegistry {
    pub fn empty() -> Self {
        ConverterRegistry {
            custom: Vec::new(),
            builtin: Vec::new(),
        }
    }

    pub fn builtin() -> Self {
        ConverterRegistry {
            custom: Vec::new(),
            builtin: vec![
                Box::new(EnumFromText),
                Box::new(BoolFromSByte),
                Box::new(ListFromText),
            ],
        }
    }

    pub fn with_rule(mut self, rule: impl ConversionRule + 'static) -> Self {
        self.custom.push(Box::new(rule));
        self
    }

    /// First converter offered by a rule, or `None` if no rule applies.
    pub fn select(&self, source: DataType, target: FieldType) -> Option<Converter> {
        self.custom
            .iter()
            .chain(self.builtin.iter())
            .find_map(|rule| rule.select(source, target))
    }

    pub fn len(&self) -> usize {
        self.custom.len() + self.builtin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("custom", &self.custom.len())
            .field("builtin", &self.builtin.len())
            .finish()
    }
}
