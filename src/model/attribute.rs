//! Typed, free-form attribute values carried by `VariantCall` records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One caller-specific attribute value. Ordered maps of these are kept in
/// `VariantCall::attributes`; the concrete type of a given key is resolved
/// from a per-`variant_calling_method` schema (`schema::attribute_types`)
/// only at the TSV parse/serialize boundary, never by the oracle or the
/// set-algebra engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl AttributeValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Int(v) => Some(*v as f64),
            AttributeValue::Float(v) => Some(*v),
            AttributeValue::Bool(_) | AttributeValue::Str(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, AttributeValue::Int(_) | AttributeValue::Float(_))
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Int(v) => write!(f, "{v}"),
            AttributeValue::Float(v) => write!(f, "{v}"),
            AttributeValue::Str(v) => write!(f, "{v}"),
            AttributeValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// The four primitive kinds an attribute value may hold, used by the
/// per-caller attribute type schema to recover types at the TSV boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    Int,
    Float,
    Str,
    Bool,
}

impl AttributeType {
    /// Parse a raw TSV-embedded string into a typed value, per this
    /// attribute's schema type. Unparseable numeric/bool values fall back
    /// to the method's default, matching `utilities.get_typed_value`.
    pub fn parse(&self, raw: &str) -> AttributeValue {
        match self {
            AttributeType::Int => AttributeValue::Int(raw.parse().unwrap_or(-1)),
            AttributeType::Float => AttributeValue::Float(raw.parse().unwrap_or(-1.0)),
            AttributeType::Str => AttributeValue::Str(raw.to_string()),
            AttributeType::Bool => {
                AttributeValue::Bool(raw.eq_ignore_ascii_case("true") || raw == "1")
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_typed_attribute_values() {
        assert_eq!(AttributeType::Int.parse("42"), AttributeValue::Int(42));
        assert_eq!(
            AttributeType::Float.parse("3.5"),
            AttributeValue::Float(3.5)
        );
        assert_eq!(
            AttributeType::Bool.parse("true"),
            AttributeValue::Bool(true)
        );
        assert_eq!(AttributeType::Int.parse("oops"), AttributeValue::Int(-1));
    }

    #[test]
    fn numeric_values_convert_to_f64() {
        assert_eq!(AttributeValue::Int(5).as_f64(), Some(5.0));
        assert_eq!(AttributeValue::Float(5.5).as_f64(), Some(5.5));
        assert_eq!(AttributeValue::Bool(true).as_f64(), None);
    }
}
