use std::fmt;

use indexmap::IndexMap;

use crate::date::PlistDate;
use crate::element_type::ElementType;
use crate::table::ElementRef;

/// The native value of an element, borrowed from its table.
///
/// Arrays are fully materialized: every item is resolved recursively.
/// Dict values stay as [`ElementRef`] handles so callers resolve
/// deeper levels only when they need them. Map order is the order the
/// keys were encoded in.
#[derive(Clone, Debug, PartialEq)]
pub enum Value<'t> {
    Null,
    Bool(bool),
    Int(i64),
    Float32(f32),
    Float64(f64),
    Date(PlistDate),
    Bytes(&'t [u8]),
    String(&'t str),
    Uid(u32),
    Array(Vec<Value<'t>>),
    Dict(IndexMap<String, ElementRef<'t>>),
}

impl<'t> Value<'t> {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Either float width widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float32(f) => Some(f64::from(*f)),
            Self::Float64(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'t str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&'t [u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value<'t>]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&IndexMap<String, ElementRef<'t>>> {
        match self {
            Self::Dict(map) => Some(map),
            _ => None,
        }
    }

    /// Type tag of the value. Both string kinds report
    /// [`ElementType::AsciiString`]; ask the [`ElementRef`] when the
    /// encoding matters.
    pub fn value_type(&self) -> ElementType {
        match self {
            Self::Null => ElementType::Null,
            Self::Bool(_) => ElementType::Bool,
            Self::Int(_) => ElementType::Int,
            Self::Float32(_) => ElementType::Float32,
            Self::Float64(_) => ElementType::Float64,
            Self::Date(_) => ElementType::Date,
            Self::Bytes(_) => ElementType::Bytes,
            Self::String(_) => ElementType::AsciiString,
            Self::Uid(_) => ElementType::Uid,
            Self::Array(_) => ElementType::Array,
            Self::Dict(_) => ElementType::Dict,
        }
    }
}

impl fmt::Display for Value<'_> {
    /// Plain-text form, used for dict keys.
    ///
    /// Strings print as-is, numbers in decimal, bytes as lowercase hex,
    /// arrays as `[a, b]`. Dict values are unresolved, so a dict prints
    /// its keys against the table index of each value: `{k=#3}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Bytes(bytes) => bytes.iter().try_for_each(|b| write!(f, "{b:02x}")),
            Self::String(s) => f.write_str(s),
            Self::Uid(uid) => write!(f, "{uid}"),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Dict(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}=#{}", value.index())?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Int(-42).to_string(), "-42");
        assert_eq!(Value::Float64(1.5).to_string(), "1.5");
        assert_eq!(Value::String("key").to_string(), "key");
        assert_eq!(Value::Bytes(&[0xDE, 0xAD]).to_string(), "dead");
        assert_eq!(Value::Uid(7).to_string(), "7");
    }

    #[test]
    fn array_display() {
        let value = Value::Array(vec![Value::Bool(true), Value::Int(42), Value::String("x")]);
        assert_eq!(value.to_string(), "[true, 42, x]");
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(1).as_bool(), None);
        assert_eq!(Value::Float32(0.5).as_f64(), Some(0.5));
        assert_eq!(Value::String("a").as_str(), Some("a"));
        assert_eq!(Value::Null.value_type(), ElementType::Null);
    }
}
