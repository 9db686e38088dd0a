//! Schema validation logic.
//!
//! This module handles:
//! - Column-set validation (extra and missing columns)
//! - Type validation (values match the declared type)
//! - Nullability validation (non-nullable columns have values)
//! - Uniqueness validation (unique columns hold distinct values)

use crate::CompiledCheck;
use spellbook_core::{
    ColumnPresence, ColumnSpec, FailureCase, RecordSet, Schema, StructuralSchemaError, Value,
    ValueConstraintError,
};
use std::collections::{BTreeSet, HashMap};

/// Validates record sets against the column declarations of a schema.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Creates a new schema validator.
    pub fn new() -> Self {
        Self
    }

    /// Compares the columns carried by the records with the declared ones.
    ///
    /// Extra columns appear in some record without being declared; missing
    /// columns are declared but absent from at least one record.
    pub fn validate_columns(
        &self,
        schema: &Schema,
        records: &RecordSet,
    ) -> Option<StructuralSchemaError> {
        let declared: BTreeSet<&str> = schema.column_names().collect();
        let everywhere = records.columns_in_every_record();

        let extra: Vec<ColumnPresence> = records
            .columns()
            .into_iter()
            .filter(|column| !declared.contains(column.as_str()))
            .map(|column| ColumnPresence {
                non_null_rows: records.non_null_rows(&column),
                absent_rows: Vec::new(),
                column,
            })
            .collect();

        let missing: Vec<ColumnPresence> = schema
            .column_names()
            .filter(|column| !everywhere.contains(*column))
            .map(|column| ColumnPresence {
                column: column.to_string(),
                non_null_rows: records.non_null_rows(column),
                absent_rows: records.absent_rows(column),
            })
            .collect();

        if extra.is_empty() && missing.is_empty() {
            return None;
        }

        let rows: BTreeSet<usize> = extra
            .iter()
            .chain(&missing)
            .flat_map(|presence| presence.non_null_rows.iter().copied())
            .collect();

        Some(StructuralSchemaError {
            extra,
            missing,
            rows: rows.into_iter().collect(),
        })
    }

    /// Reports values whose variant does not match the declared type.
    pub fn validate_type(
        &self,
        schema: &Schema,
        column: &ColumnSpec,
        records: &RecordSet,
    ) -> Option<ValueConstraintError> {
        let failures = collect_failures(schema, column, records, |value| {
            !value.is_null() && !column.value_type.accepts(value)
        });
        constraint_error(column, format!("dtype({})", column.value_type), failures)
    }

    /// Reports null or absent values in a non-nullable column.
    pub fn validate_nullability(
        &self,
        schema: &Schema,
        column: &ColumnSpec,
        records: &RecordSet,
    ) -> Option<ValueConstraintError> {
        if column.nullable {
            return None;
        }

        let failures = records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.get(&column.name).is_none_or(|value| value.is_null()))
            .map(|(row, record)| FailureCase {
                row,
                key: schema.natural_key(record),
                value: Value::Null,
            })
            .collect();
        constraint_error(column, "not_nullable".to_string(), failures)
    }

    /// Reports every row holding a value that occurs more than once.
    pub fn validate_uniqueness(
        &self,
        schema: &Schema,
        column: &ColumnSpec,
        records: &RecordSet,
    ) -> Option<ValueConstraintError> {
        if !column.unique {
            return None;
        }

        let mut occurrences: HashMap<(&'static str, String), usize> = HashMap::new();
        for record in records {
            if let Some(value) = record.get(&column.name).filter(|value| !value.is_null()) {
                *occurrences
                    .entry((value.type_name(), value.to_string()))
                    .or_default() += 1;
            }
        }

        let failures = collect_failures(schema, column, records, |value| {
            occurrences
                .get(&(value.type_name(), value.to_string()))
                .is_some_and(|count| *count > 1)
        });
        constraint_error(column, "unique".to_string(), failures)
    }

    /// Evaluates one declared check over every non-null, well-typed value.
    pub fn validate_check(
        &self,
        schema: &Schema,
        column: &ColumnSpec,
        check: &CompiledCheck,
        records: &RecordSet,
    ) -> Option<ValueConstraintError> {
        let failures = collect_failures(schema, column, records, |value| {
            column.value_type.accepts(value) && !check.passes(value)
        });
        constraint_error(column, check.name().to_string(), failures)
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects the non-null values of `column` for which `fails` holds.
fn collect_failures<F>(
    schema: &Schema,
    column: &ColumnSpec,
    records: &RecordSet,
    fails: F,
) -> Vec<FailureCase>
where
    F: Fn(&Value) -> bool,
{
    records
        .iter()
        .enumerate()
        .filter_map(|(row, record)| {
            let value = record.get(&column.name)?;
            (!value.is_null() && fails(value)).then(|| FailureCase {
                row,
                key: schema.natural_key(record),
                value: value.clone(),
            })
        })
        .collect()
}

fn constraint_error(
    column: &ColumnSpec,
    check: String,
    failures: Vec<FailureCase>,
) -> Option<ValueConstraintError> {
    (!failures.is_empty()).then(|| ValueConstraintError {
        column: column.name.clone(),
        check,
        failures,
    })
}
