//! Filter specifications and query expressions.

use crate::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Column → acceptable values, applied conjunctively across columns and
/// disjunctively within a column.
///
/// Entries are kept sorted by column name so that the order of application
/// is deterministic. In a filter document a scalar stands for a one-element
/// set:
///
/// ```rust
/// use spellbook_core::{FilterSpec, Value};
///
/// let spec: FilterSpec = serde_json::from_str(r#"{"escola": "elemental", "nivel": [1, 3]}"#).unwrap();
/// assert_eq!(spec.values("escola"), Some(&[Value::from("elemental")][..]));
/// assert_eq!(spec.values("nivel").map(|v| v.len()), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, FilterValues>", into = "BTreeMap<String, FilterValues>")]
pub struct FilterSpec {
    entries: BTreeMap<String, Vec<Value>>,
}

/// Raw filter value as written in a filter document: one value or many.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValues {
    /// A list of acceptable values
    Many(Vec<Value>),
    /// A single acceptable value
    One(Value),
}

impl FilterValues {
    fn into_vec(self) -> Vec<Value> {
        match self {
            FilterValues::Many(values) => values,
            FilterValues::One(value) => vec![value],
        }
    }
}

impl FilterSpec {
    /// Creates an empty filter (the identity).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the acceptable values for `column`.
    pub fn with<I, V>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.entries
            .insert(column.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Adds (or replaces) a single acceptable value for `column`.
    pub fn with_value(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(column, [value.into()])
    }

    /// Returns the acceptable values for `column`.
    pub fn values(&self, column: &str) -> Option<&[Value]> {
        self.entries.get(column).map(Vec::as_slice)
    }

    /// Iterates over `(column, values)` in application order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.entries
            .iter()
            .map(|(column, values)| (column.as_str(), values.as_slice()))
    }

    /// Returns the number of filtered columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the filter has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Combines two filters into one. Entries of `other` win on conflict.
    pub fn merge(&self, other: &FilterSpec) -> FilterSpec {
        let mut entries = self.entries.clone();
        entries.extend(
            other
                .entries
                .iter()
                .map(|(column, values)| (column.clone(), values.clone())),
        );
        FilterSpec { entries }
    }
}

impl From<BTreeMap<String, FilterValues>> for FilterSpec {
    fn from(raw: BTreeMap<String, FilterValues>) -> Self {
        Self {
            entries: raw
                .into_iter()
                .map(|(column, values)| (column, values.into_vec()))
                .collect(),
        }
    }
}

impl From<FilterSpec> for BTreeMap<String, FilterValues> {
    fn from(spec: FilterSpec) -> Self {
        spec.entries
            .into_iter()
            .map(|(column, values)| (column, FilterValues::Many(values)))
            .collect()
    }
}

/// A free-form boolean expression over the columns of a record set.
///
/// The expression is opaque to this crate; it is evaluated by the query
/// engine. It can be written on several lines, which are trimmed and joined
/// with a single space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryExpression(String);

impl QueryExpression {
    /// Creates an expression from a single string.
    pub fn new(expression: impl Into<String>) -> Self {
        Self(expression.into().trim().to_string())
    }

    /// Creates an expression from several lines.
    ///
    /// Lines are trimmed, blank lines are dropped and the rest is joined with
    /// a single space.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = lines
            .into_iter()
            .filter_map(|line| {
                let line = line.as_ref().trim();
                (!line.is_empty()).then(|| line.to_string())
            })
            .collect::<Vec<_>>()
            .join(" ");
        Self(joined)
    }

    /// Returns the expression text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the expression is blank.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for QueryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QueryExpression {
    fn from(expression: &str) -> Self {
        Self::new(expression)
    }
}
