//! Declared field types, extracted values and typed assignment.
//!
//! Every mapped field declares a [`FieldType`]. Codecs produce a [`Value`] for
//! each field of a line, and the field's setter turns that value back into a
//! concrete Rust type through [`FromValue`]. The check between the two is what
//! catches a codec that returns the wrong kind of value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The semantic type a field is declared with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    Char,
    Int,
    UInt,
    Float,
    Bool,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Text => "text",
            FieldType::Char => "char",
            FieldType::Int => "int",
            FieldType::UInt => "uint",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
        };
        f.write_str(name)
    }
}

/// A single value extracted from a line.
///
/// `Absent` is the sentinel for an optional trailing field the line does not
/// reach, and for blank input converted to a non-text type.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Absent,
    Text(String),
    Char(char),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// The runtime type of this value, `None` for [`Value::Absent`].
    #[must_use]
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            Value::Absent => None,
            Value::Text(_) => Some(FieldType::Text),
            Value::Char(_) => Some(FieldType::Char),
            Value::Int(_) => Some(FieldType::Int),
            Value::UInt(_) => Some(FieldType::UInt),
            Value::Float(_) => Some(FieldType::Float),
            Value::Bool(_) => Some(FieldType::Bool),
        }
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Short name of the runtime type, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> String {
        self.field_type()
            .map_or_else(|| "absent".to_string(), |t| t.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => f.write_str("<absent>"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Char(c) => write!(f, "{c:?}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::UInt(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Conversion from an extracted [`Value`] into a record field's Rust type.
///
/// `from_value` hands the value back unchanged when it cannot be assigned, so
/// the caller can report what was actually produced.
pub trait FromValue: Sized {
    /// The declared type of a field holding `Self`.
    const FIELD_TYPE: FieldType;

    /// Whether [`Value::Absent`] is assignable. Only `Option<T>` is.
    const NULLABLE: bool = false;

    fn from_value(value: Value) -> Result<Self, Value>;
}

impl FromValue for String {
    const FIELD_TYPE: FieldType = FieldType::Text;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl FromValue for char {
    const FIELD_TYPE: FieldType = FieldType::Char;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Char(c) => Ok(c),
            other => Err(other),
        }
    }
}

impl FromValue for bool {
    const FIELD_TYPE: FieldType = FieldType::Bool;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl FromValue for f64 {
    const FIELD_TYPE: FieldType = FieldType::Float;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Float(x) => Ok(x),
            other => Err(other),
        }
    }
}

impl FromValue for f32 {
    const FIELD_TYPE: FieldType = FieldType::Float;

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Float(x) => Ok(x as f32),
            other => Err(other),
        }
    }
}

macro_rules! impl_from_value_int {
    ($variant:ident, $field_type:ident, $($t:ty),+) => {
        $(
            impl FromValue for $t {
                const FIELD_TYPE: FieldType = FieldType::$field_type;

                fn from_value(value: Value) -> Result<Self, Value> {
                    match value {
                        Value::$variant(n) => <$t>::try_from(n).map_err(|_| Value::$variant(n)),
                        other => Err(other),
                    }
                }
            }
        )+
    };
}

impl_from_value_int!(Int, Int, i64, i32, i16, i8);
impl_from_value_int!(UInt, UInt, u64, u32, u16, u8);

impl<T: FromValue> FromValue for Option<T> {
    const FIELD_TYPE: FieldType = T::FIELD_TYPE;
    const NULLABLE: bool = true;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Absent => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
