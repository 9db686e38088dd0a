//! Field values carried by spell records.
//!
//! A record field holds one of a small set of primitive values. Lists are
//! always lists of strings: schools, elements, classes and tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field value.
///
/// Deserialization is untagged, so a JSON document maps onto the variants
/// naturally: `null`, strings, integers, floats, booleans and arrays of
/// strings. Nested objects and arrays of non-strings are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/missing value
    Null,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Floating point value (only survives loading to be reported as a type error)
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// List of strings
    List(Vec<String>),
}

impl Value {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this value is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::List(_) => "list",
        }
    }

    /// Attempts to get this value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a float. Integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to get this value as a list of strings.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Compares two values the way filters do.
    ///
    /// Numbers compare numerically (`3` equals `3.0`), everything else
    /// compares on its display form, so a filter value `"3"` read from a file
    /// still selects an integer `3`. `Null` only equals `Null`.
    pub fn loosely_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            _ => match (self.as_float(), other.as_float()) {
                (Some(a), Some(b)) => a == b,
                _ => self.to_string() == other.to_string(),
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::String(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::List(items.into_iter().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_types() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::from("fogo").type_name(), "string");
        assert_eq!(Value::from(3).type_name(), "integer");
        assert_eq!(Value::from(2.5).type_name(), "float");
        assert_eq!(Value::from(true).type_name(), "boolean");
        assert_eq!(Value::from(vec!["ar"]).type_name(), "list");
    }

    #[test]
    fn test_value_conversions() {
        let val = Value::from("luz");
        assert_eq!(val.as_str(), Some("luz"));
        assert_eq!(val.as_int(), None);

        let val = Value::from(7);
        assert_eq!(val.as_int(), Some(7));
        assert_eq!(val.as_float(), Some(7.0));
        assert_eq!(val.as_list(), None);
    }

    #[test]
    fn test_deserialize_untagged() {
        let parsed: Vec<Value> =
            serde_json::from_str(r#"[null, "toque", 3, 1.5, false, ["ar", "fogo"]]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                Value::Null,
                Value::from("toque"),
                Value::Int(3),
                Value::Float(1.5),
                Value::Bool(false),
                Value::from(vec!["ar", "fogo"]),
            ]
        );
    }

    #[test]
    fn test_nested_object_is_rejected() {
        let parsed: Result<Value, _> = serde_json::from_str(r#"{"a": 1}"#);
        assert!(parsed.is_err());

        let parsed: Result<Value, _> = serde_json::from_str(r#"[1, 2]"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_loosely_equals() {
        assert!(Value::Int(3).loosely_equals(&Value::Float(3.0)));
        assert!(Value::Int(3).loosely_equals(&Value::from("3")));
        assert!(Value::from("pura").loosely_equals(&Value::from("pura")));
        assert!(!Value::from("pura").loosely_equals(&Value::from("Pura")));
        assert!(!Value::Null.loosely_equals(&Value::from("null")));
        assert!(Value::Null.loosely_equals(&Value::Null));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(vec!["ar", "água"]).to_string(), "[ar, água]");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(false).to_string(), "false");
    }
}
