//! Error types for schema definitions.

use thiserror::Error;

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// A schema declaration that cannot be used for validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// The schema declares no columns
    #[error("Schema '{0}' declares no columns")]
    NoColumns(String),

    /// Two columns share a name
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// The natural-key column is not declared
    #[error("Key column '{0}' is not declared in the schema")]
    UnknownKeyColumn(String),

    /// A default value does not have the column's type
    #[error("Default for column '{column}' has type {actual}, expected {expected}")]
    InvalidDefault {
        /// Column name
        column: String,
        /// Declared type
        expected: String,
        /// Type of the default
        actual: String,
    },

    /// A check is declared on a column type it cannot evaluate
    #[error("Check '{check}' on column '{column}' does not apply to type {value_type}")]
    InapplicableCheck {
        /// Column name
        column: String,
        /// Check name
        check: String,
        /// Declared type
        value_type: String,
    },

    /// A regex pattern failed to compile
    #[error("Invalid regex pattern for column '{column}': {message}")]
    InvalidPattern {
        /// Column name
        column: String,
        /// The offending pattern
        pattern: String,
        /// Compiler message
        message: String,
    },
}
