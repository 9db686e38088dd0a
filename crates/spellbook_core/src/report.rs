//! Validation reports.
//!
//! Validation never stops at the first problem. Structural problems (extra or
//! missing columns) and value problems (failed checks) are collected into a
//! [`ValidationReport`] that enumerates every offending record.

use crate::Value;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Outcome of validating a record set against a schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    /// Every column and value conforms
    Valid,
    /// At least one column failed
    Invalid {
        /// Failures, structural first, then per column in schema order
        column_errors: Vec<ColumnError>,
    },
}

/// Report of a validation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Whether validation passed, and why not
    pub outcome: Outcome,

    /// Validation statistics
    pub stats: ValidationStats,
}

/// Statistics about validation execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationStats {
    /// Number of records validated
    pub records_validated: usize,

    /// Number of declared columns checked
    pub columns_checked: usize,

    /// Number of checks evaluated (type, nullability, uniqueness included)
    pub checks_evaluated: usize,

    /// Validation duration in milliseconds
    pub duration_ms: u64,

    /// When validation started
    pub validated_at: DateTime<Utc>,
}

impl ValidationStats {
    /// Creates empty statistics stamped with the current time.
    pub fn started_now() -> Self {
        Self {
            records_validated: 0,
            columns_checked: 0,
            checks_evaluated: 0,
            duration_ms: 0,
            validated_at: Utc::now(),
        }
    }
}

impl ValidationReport {
    /// Builds a report from collected errors; no errors means `Valid`.
    pub fn from_errors(column_errors: Vec<ColumnError>, stats: ValidationStats) -> Self {
        let outcome = if column_errors.is_empty() {
            Outcome::Valid
        } else {
            Outcome::Invalid { column_errors }
        };
        Self { outcome, stats }
    }

    /// Returns true if the record set is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, Outcome::Valid)
    }

    /// Returns every failure, in report order.
    pub fn column_errors(&self) -> &[ColumnError] {
        match &self.outcome {
            Outcome::Valid => &[],
            Outcome::Invalid { column_errors } => column_errors,
        }
    }

    /// Returns the structural failure, if any.
    pub fn structural_error(&self) -> Option<&StructuralSchemaError> {
        self.column_errors().iter().find_map(|error| match error {
            ColumnError::Structural(structural) => Some(structural),
            ColumnError::ValueConstraint(_) => None,
        })
    }

    /// Returns the value failures, in schema order.
    pub fn value_errors(&self) -> impl Iterator<Item = &ValueConstraintError> {
        self.column_errors().iter().filter_map(|error| match error {
            ColumnError::ValueConstraint(value) => Some(value),
            ColumnError::Structural(_) => None,
        })
    }

    /// Returns the names of columns with at least one value failure.
    pub fn failing_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for error in self.value_errors() {
            if !columns.contains(&error.column.as_str()) {
                columns.push(error.column.as_str());
            }
        }
        columns
    }
}

/// One entry of a validation report.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnError {
    /// Extra or missing columns
    #[error(transparent)]
    Structural(StructuralSchemaError),

    /// A check failed for one or more records
    #[error(transparent)]
    ValueConstraint(ValueConstraintError),
}

/// The record set does not carry exactly the declared columns.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{}", describe_structural(.extra, .missing))]
pub struct StructuralSchemaError {
    /// Columns present in some record but not declared
    pub extra: Vec<ColumnPresence>,

    /// Declared columns absent from at least one record
    pub missing: Vec<ColumnPresence>,

    /// Union of the non-null row indices of every offending column
    pub rows: Vec<usize>,
}

/// Where an offending column actually appears.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnPresence {
    /// Column name
    pub column: String,

    /// Records where the column holds a non-null value
    pub non_null_rows: Vec<usize>,

    /// Records that do not carry the column at all
    pub absent_rows: Vec<usize>,
}

/// A check failed for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("Column '{column}' failed {check} for {} record(s)", .failures.len())]
pub struct ValueConstraintError {
    /// Column name
    pub column: String,

    /// Name of the failed check
    pub check: String,

    /// Every failing record; never truncated
    pub failures: Vec<FailureCase>,
}

/// One failing record of a value check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureCase {
    /// Index of the record in the validated set
    pub row: usize,

    /// Natural identifier of the record
    pub key: String,

    /// The offending value
    pub value: Value,
}

impl ValueConstraintError {
    /// Renders the failures as a `row | key | value` table.
    pub fn table(&self) -> String {
        let key_width = self
            .failures
            .iter()
            .map(|failure| failure.key.chars().count())
            .max()
            .unwrap_or(0)
            .max("key".len());
        let row_width = self
            .failures
            .iter()
            .map(|failure| failure.row.to_string().len())
            .max()
            .unwrap_or(0)
            .max("row".len());

        let mut lines = vec![format!(
            "{:>row_width$} | {:<key_width$} | value",
            "row", "key"
        )];
        for failure in &self.failures {
            lines.push(format!(
                "{:>row_width$} | {:<key_width$} | {}",
                failure.row, failure.key, failure.value
            ));
        }
        lines.join("\n")
    }
}

impl fmt::Display for ColumnPresence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (non-null rows: {:?}", self.column, self.non_null_rows)?;
        if !self.absent_rows.is_empty() {
            write!(f, ", absent from rows: {:?}", self.absent_rows)?;
        }
        write!(f, ")")
    }
}

fn describe_structural(extra: &[ColumnPresence], missing: &[ColumnPresence]) -> String {
    let join = |columns: &[ColumnPresence]| {
        columns
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut parts = Vec::new();
    if !extra.is_empty() {
        parts.push(format!("Extra columns: {}", join(extra)));
    }
    if !missing.is_empty() {
        parts.push(format!("Missing columns: {}", join(missing)));
    }
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nivel_error() -> ValueConstraintError {
        ValueConstraintError {
            column: "nivel".to_string(),
            check: "range(0, 9)".to_string(),
            failures: vec![
                FailureCase {
                    row: 3,
                    key: "Bola de Fogo".to_string(),
                    value: Value::Int(15),
                },
                FailureCase {
                    row: 12,
                    key: "Luz".to_string(),
                    value: Value::Int(-1),
                },
            ],
        }
    }

    #[test]
    fn test_valid_report() {
        let report = ValidationReport::from_errors(vec![], ValidationStats::started_now());
        assert!(report.is_valid());
        assert!(report.column_errors().is_empty());
        assert!(report.structural_error().is_none());
    }

    #[test]
    fn test_invalid_report_accessors() {
        let structural = StructuralSchemaError {
            extra: vec![ColumnPresence {
                column: "foo".to_string(),
                non_null_rows: vec![0],
                absent_rows: vec![1],
            }],
            missing: vec![],
            rows: vec![0],
        };
        let report = ValidationReport::from_errors(
            vec![
                ColumnError::Structural(structural.clone()),
                ColumnError::ValueConstraint(nivel_error()),
            ],
            ValidationStats::started_now(),
        );

        assert!(!report.is_valid());
        assert_eq!(report.structural_error(), Some(&structural));
        assert_eq!(report.failing_columns(), vec!["nivel"]);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            nivel_error().to_string(),
            "Column 'nivel' failed range(0, 9) for 2 record(s)"
        );

        let structural = StructuralSchemaError {
            extra: vec![ColumnPresence {
                column: "foo".to_string(),
                non_null_rows: vec![0],
                absent_rows: vec![],
            }],
            missing: vec![ColumnPresence {
                column: "bar".to_string(),
                non_null_rows: vec![0],
                absent_rows: vec![1],
            }],
            rows: vec![0],
        };
        assert_eq!(
            structural.to_string(),
            "Extra columns: foo (non-null rows: [0]); \
             Missing columns: bar (non-null rows: [0], absent from rows: [1])"
        );
    }

    #[test]
    fn test_failure_table() {
        let table = nivel_error().table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "row | key          | value");
        assert_eq!(lines[1], "  3 | Bola de Fogo | 15");
        assert_eq!(lines[2], " 12 | Luz          | -1");
    }

    #[test]
    fn test_report_serializes_with_status() {
        let report = ValidationReport::from_errors(
            vec![ColumnError::ValueConstraint(nivel_error())],
            ValidationStats::started_now(),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"]["status"], "invalid");
        assert_eq!(json["outcome"]["column_errors"][0]["kind"], "value_constraint");
        assert_eq!(json["outcome"]["column_errors"][0]["failures"][0]["value"], 15);
    }
}
