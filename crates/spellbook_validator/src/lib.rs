//! # Spellbook Validator
//!
//! Validation engine for spell records. This crate checks record sets
//! against a declarative [`Schema`](spellbook_core::Schema):
//!
//! - Preparation (list normalisation, default filling)
//! - Column-set validation (extra and missing columns)
//! - Per-column validation (type, nullability, uniqueness)
//! - Declared checks (range, allowed values, list subsets, regex full match)
//!
//! Validation never stops at the first problem: every failure, with every
//! offending record, ends up in the [`ValidationReport`](spellbook_core::ValidationReport).
//!
//! ## Example
//!
//! ```rust
//! use spellbook_core::{Check, ColumnBuilder, Record, RecordSet, SchemaBuilder, Value, ValueType};
//! use spellbook_validator::DataValidator;
//!
//! let schema = SchemaBuilder::new("spells", "nome")
//!     .column(ColumnBuilder::new("nome", ValueType::String).build())
//!     .column(
//!         ColumnBuilder::new("nivel", ValueType::Integer)
//!             .check(Check::Range { min: Some(0.0), max: Some(9.0) })
//!             .build(),
//!     )
//!     .build();
//! let validator = DataValidator::new(schema).unwrap();
//!
//! let records = RecordSet::from_records(vec![Record::from([
//!     ("nome".to_string(), Value::from("Bola de Fogo")),
//!     ("nivel".to_string(), Value::Int(15)),
//! ])]);
//!
//! let report = validator.validate(&records).unwrap();
//! assert!(!report.is_valid());
//! assert_eq!(report.failing_columns(), vec!["nivel"]);
//! ```

mod checks;
mod defaults;
mod engine;
mod error;
mod schema;

pub use checks::*;
pub use defaults::*;
pub use engine::*;
pub use error::*;
pub use schema::*;
