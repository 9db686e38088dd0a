//! Declarative record schemas.
//!
//! A [`Schema`] is data, not code: an ordered list of [`ColumnSpec`]s, each
//! declaring a primitive type, nullability, uniqueness, an optional default
//! and a list of [`Check`]s. The validation algorithm never changes when a
//! record type is added or an allowed-value table grows; only the schema does.

use crate::{Record, SchemaError, Value};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Primitive type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Integer,
    /// Boolean
    Boolean,
    /// List of strings
    List,
}

impl ValueType {
    /// Returns true if `value` has this type. `Null` is never accepted here;
    /// nullability is checked separately.
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ValueType::String, Value::String(_))
                | (ValueType::Integer, Value::Int(_))
                | (ValueType::Boolean, Value::Bool(_))
                | (ValueType::List, Value::List(_))
        )
    }

    /// Returns the lowercase type name.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Boolean => "boolean",
            ValueType::List => "list",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named predicate over the values of one column.
///
/// The set of checks is closed. Every variant is evaluated by a
/// single dispatcher in the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Check {
    /// Numeric value must lie in `[min, max]`; a missing bound is unbounded.
    Range {
        /// Minimum value (inclusive)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Maximum value (inclusive)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },

    /// Scalar value must be one of the allowed values.
    #[serde(rename = "isin")]
    IsIn {
        /// Allowed values, compared on the scalar's string form
        values: Vec<String>,
    },

    /// Every element of a list value must be one of the allowed values.
    ListSubsetOf {
        /// Allowed elements
        values: Vec<String>,
    },

    /// String value must match the pattern in full.
    RegexFullmatch {
        /// Regular expression pattern, without anchors
        pattern: String,
    },

    /// String value must not contain uppercase characters.
    Lowercase,
}

impl Check {
    /// Returns a short human-readable name used in reports.
    pub fn name(&self) -> String {
        match self {
            Check::Range { min, max } => format!(
                "range({}, {})",
                min.map_or_else(|| "-inf".to_string(), |m| m.to_string()),
                max.map_or_else(|| "+inf".to_string(), |m| m.to_string())
            ),
            Check::IsIn { .. } => "isin".to_string(),
            Check::ListSubsetOf { .. } => "list_subset_of".to_string(),
            Check::RegexFullmatch { pattern } => format!("regex_fullmatch({})", pattern),
            Check::Lowercase => "lowercase".to_string(),
        }
    }

    /// Returns true if this check can be declared on a column of `value_type`.
    pub fn applies_to(&self, value_type: ValueType) -> bool {
        match self {
            Check::Range { .. } => value_type == ValueType::Integer,
            Check::IsIn { .. } => value_type != ValueType::List,
            Check::ListSubsetOf { .. } => value_type == ValueType::List,
            Check::RegexFullmatch { .. } | Check::Lowercase => value_type == ValueType::String,
        }
    }
}

/// Declaration of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name
    pub name: String,

    /// Expected primitive type
    #[serde(rename = "type")]
    pub value_type: ValueType,

    /// Whether the column may hold null values after defaulting
    #[serde(default)]
    pub nullable: bool,

    /// Whether values must be distinct across the record set
    #[serde(default)]
    pub unique: bool,

    /// Value used when the field is missing or null
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Ordered value checks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<Check>,

    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A record schema: an ordered set of column declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Name of the record type (e.g. "spells")
    pub name: String,

    /// Column holding the natural identifier used in reports
    pub key_column: String,

    /// Column declarations, in order
    pub columns: Vec<ColumnSpec>,
}

impl Schema {
    /// Looks up a column declaration by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Returns true if `name` is a declared column.
    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Returns the declared column names, in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    /// Returns the names of list-typed columns, in order.
    pub fn list_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|column| column.value_type == ValueType::List)
            .map(|column| column.name.as_str())
            .collect()
    }

    /// Collects the declared defaults.
    pub fn column_defaults(&self) -> ColumnDefaults {
        self.columns
            .iter()
            .filter_map(|column| {
                column
                    .default
                    .as_ref()
                    .map(|default| (column.name.clone(), default.clone()))
            })
            .collect()
    }

    /// Returns the natural identifier of `record`, for reports.
    pub fn natural_key(&self, record: &Record) -> String {
        match record.get(&self.key_column) {
            Some(Value::Null) | None => "<missing>".to_string(),
            Some(value) => value.to_string(),
        }
    }

    /// Checks that the schema definition itself is well-formed.
    ///
    /// Regex patterns are compiled by the validator, not here.
    pub fn check_definition(&self) -> Result<(), SchemaError> {
        if self.columns.is_empty() {
            return Err(SchemaError::NoColumns(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn(column.name.clone()));
            }

            if let Some(default) = &column.default {
                if !default.is_null() && !column.value_type.accepts(default) {
                    return Err(SchemaError::InvalidDefault {
                        column: column.name.clone(),
                        expected: column.value_type.to_string(),
                        actual: default.type_name().to_string(),
                    });
                }
            }

            for check in &column.checks {
                if !check.applies_to(column.value_type) {
                    return Err(SchemaError::InapplicableCheck {
                        column: column.name.clone(),
                        check: check.name(),
                        value_type: column.value_type.to_string(),
                    });
                }
            }
        }

        if !self.contains(&self.key_column) {
            return Err(SchemaError::UnknownKeyColumn(self.key_column.clone()));
        }

        Ok(())
    }
}

/// Default values per column, applied before validation.
///
/// A column whose default is a list is treated as list-typed by the
/// default filler: any non-list value in it is replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnDefaults {
    defaults: BTreeMap<String, Value>,
}

impl ColumnDefaults {
    /// Creates an empty set of defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a default for `column`.
    pub fn with(mut self, column: impl Into<String>, default: impl Into<Value>) -> Self {
        self.defaults.insert(column.into(), default.into());
        self
    }

    /// Returns the default declared for `column`.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.defaults.get(column)
    }

    /// Iterates over `(column, default)` pairs in column-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.defaults
            .iter()
            .map(|(column, default)| (column.as_str(), default))
    }

    /// Returns the number of defaulted columns.
    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    /// Returns true if no column has a default.
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }
}

impl FromIterator<(String, Value)> for ColumnDefaults {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            defaults: iter.into_iter().collect(),
        }
    }
}
