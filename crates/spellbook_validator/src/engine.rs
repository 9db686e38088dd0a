//! Main validation engine.
//!
//! This module provides the `DataValidator` that prepares record sets
//! (list normalisation and default filling) and orchestrates the structural
//! and per-column checks into a single [`ValidationReport`].

use crate::{CompiledCheck, SchemaValidator, ValidationError, fill_defaults, normalize_list_columns};
use spellbook_core::{
    ColumnError, RecordSet, Schema, SchemaError, ValidationReport, ValidationStats,
};
use std::time::Instant;
use tracing::{debug, info};

/// Main validation engine for record sets.
///
/// The schema is compiled once; the validator can then be reused for any
/// number of record sets.
///
/// # Example
///
/// ```rust
/// use spellbook_core::{Record, RecordSet, Value, spells::spell_schema};
/// use spellbook_validator::DataValidator;
///
/// let validator = DataValidator::new(spell_schema()).unwrap();
/// let records = RecordSet::from_records(vec![Record::from([(
///     "nome".to_string(),
///     Value::from("Luz"),
/// )])]);
///
/// let report = validator.validate(&validator.prepare(&records)).unwrap();
///
/// if report.is_valid() {
///     println!("Validation passed!");
/// } else {
///     for error in report.column_errors() {
///         println!("Error: {}", error);
///     }
/// }
/// ```
pub struct DataValidator {
    schema: Schema,
    // One entry per schema column, same order.
    checks: Vec<Vec<CompiledCheck>>,
    schema_validator: SchemaValidator,
}

impl DataValidator {
    /// Creates a validator for `schema`.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if the schema definition is malformed or a
    /// regex pattern does not compile.
    pub fn new(schema: Schema) -> Result<Self, SchemaError> {
        schema.check_definition()?;

        let checks = schema
            .columns
            .iter()
            .map(|column| {
                column
                    .checks
                    .iter()
                    .map(|check| CompiledCheck::compile(&column.name, check))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            schema,
            checks,
            schema_validator: SchemaValidator::new(),
        })
    }

    /// Returns the schema this validator enforces.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Normalises list columns and fills declared defaults.
    pub fn prepare(&self, records: &RecordSet) -> RecordSet {
        let normalized = normalize_list_columns(records, &self.schema);
        fill_defaults(&normalized, &self.schema.column_defaults())
    }

    /// Validates a record set.
    ///
    /// Every problem is collected: the structural check runs first and the
    /// per-column checks always run after it, in schema order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyRecordSet`] if there are no records.
    pub fn validate(&self, records: &RecordSet) -> Result<ValidationReport, ValidationError> {
        if records.is_empty() {
            return Err(ValidationError::EmptyRecordSet);
        }

        info!("Validating schema '{}'...", self.schema.name);
        let start = Instant::now();
        let mut stats = ValidationStats::started_now();
        let mut errors = Vec::new();

        // 1. Column set
        if let Some(structural) = self.schema_validator.validate_columns(&self.schema, records) {
            debug!("{}", structural);
            errors.push(ColumnError::Structural(structural));
        }
        stats.checks_evaluated += 1;

        // 2. Per-column checks
        for (column, checks) in self.schema.columns.iter().zip(&self.checks) {
            let builtin = [
                self.schema_validator
                    .validate_type(&self.schema, column, records),
                self.schema_validator
                    .validate_nullability(&self.schema, column, records),
                self.schema_validator
                    .validate_uniqueness(&self.schema, column, records),
            ];
            let declared = checks.iter().map(|check| {
                self.schema_validator
                    .validate_check(&self.schema, column, check, records)
            });

            for error in builtin.into_iter().chain(declared).flatten() {
                debug!("{}", error);
                errors.push(ColumnError::ValueConstraint(error));
            }

            stats.columns_checked += 1;
            stats.checks_evaluated += 3 + checks.len();
        }

        stats.records_validated = records.len();
        stats.duration_ms = start.elapsed().as_millis() as u64;

        let report = ValidationReport::from_errors(errors, stats);
        if report.is_valid() {
            info!("Schema validated.");
        } else {
            info!(
                "Schema errors: {} failing check(s)",
                report.column_errors().len()
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use spellbook_core::{Check, ColumnBuilder, Record, SchemaBuilder, Value, ValueType};

    fn schema() -> Schema {
        SchemaBuilder::new("spells", "nome")
            .column(
                ColumnBuilder::new("nome", ValueType::String)
                    .unique(true)
                    .build(),
            )
            .column(
                ColumnBuilder::new("nivel", ValueType::Integer)
                    .check(Check::Range {
                        min: Some(0.0),
                        max: Some(9.0),
                    })
                    .build(),
            )
            .build()
    }

    fn record(nome: &str, nivel: i64) -> Record {
        Record::from([
            ("nome".to_string(), Value::from(nome)),
            ("nivel".to_string(), Value::Int(nivel)),
        ])
    }

    #[test]
    fn test_new_rejects_invalid_pattern() {
        let schema = SchemaBuilder::new("spells", "nome")
            .column(
                ColumnBuilder::new("nome", ValueType::String)
                    .check(Check::RegexFullmatch {
                        pattern: "[".to_string(),
                    })
                    .build(),
            )
            .build();
        assert!(matches!(
            DataValidator::new(schema),
            Err(SchemaError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_empty_record_set_is_fatal() {
        let validator = DataValidator::new(schema()).unwrap();
        assert!(matches!(
            validator.validate(&RecordSet::empty()),
            Err(ValidationError::EmptyRecordSet)
        ));
    }

    #[test]
    fn test_valid_report_stats() {
        let validator = DataValidator::new(schema()).unwrap();
        let records = RecordSet::from_records(vec![record("Luz", 0), record("Escudo", 1)]);

        let report = validator.validate(&records).unwrap();

        assert!(report.is_valid());
        assert_eq!(report.stats.records_validated, 2);
        assert_eq!(report.stats.columns_checked, 2);
        assert_eq!(report.stats.checks_evaluated, 1 + 3 + 4);
    }

    #[test]
    fn test_structural_and_value_errors_reported_together() {
        let validator = DataValidator::new(schema()).unwrap();
        let mut extra = record("Luz", 12);
        extra.insert("foo".to_string(), Value::from("x"));
        let records = RecordSet::from_records(vec![extra, record("Luz", 2)]);

        let report = validator.validate(&records).unwrap();

        assert!(report.structural_error().is_some());
        let checks: Vec<(&str, &str)> = report
            .value_errors()
            .map(|e| (e.column.as_str(), e.check.as_str()))
            .collect();
        assert_eq!(checks, vec![("nome", "unique"), ("nivel", "range(0, 9)")]);
    }

    #[test]
    fn test_prepare_fills_defaults() {
        let schema = SchemaBuilder::new("spells", "nome")
            .column(ColumnBuilder::new("nome", ValueType::String).build())
            .column(
                ColumnBuilder::new("escola", ValueType::List)
                    .default_value(Vec::<String>::new())
                    .build(),
            )
            .build();
        let validator = DataValidator::new(schema).unwrap();
        let records = RecordSet::from_records(vec![
            Record::from([("nome".to_string(), Value::from("Luz"))]),
            Record::from([
                ("nome".to_string(), Value::from("Fogo")),
                ("escola".to_string(), Value::from("elemental")),
            ]),
        ]);

        let prepared = validator.prepare(&records);

        assert_eq!(prepared.records()[0]["escola"], Value::List(vec![]));
        assert_eq!(
            prepared.records()[1]["escola"],
            Value::from(vec!["elemental"])
        );
        assert!(validator.validate(&prepared).unwrap().is_valid());
    }
}
