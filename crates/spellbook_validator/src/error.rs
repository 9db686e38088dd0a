//! Error types for validation operations.

use spellbook_core::SchemaError;
use thiserror::Error;

/// Errors that prevent a validation run from producing a report.
///
/// Failed checks are not errors: they are collected into the
/// [`ValidationReport`](spellbook_core::ValidationReport).
#[derive(Debug, Error)]
pub enum ValidationError {
    /// There is nothing to validate
    #[error("Cannot validate an empty record set")]
    EmptyRecordSet,

    /// The schema cannot be used for validation
    #[error("Invalid schema: {0}")]
    Schema(#[from] SchemaError),
}
