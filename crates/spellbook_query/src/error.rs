//! Error types for filter and query operations.

use thiserror::Error;

/// Errors that abort a filter or query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A filter or expression names a column the schema does not declare
    #[error("No such column: '{0}'")]
    NoSuchColumn(String),

    /// The expression cannot be parsed
    #[error("Invalid query expression: {0}")]
    QuerySyntax(String),

    /// A list element contains the delimiter used to flatten list columns
    #[error(
        "Element '{element}' of column '{column}' (row {row}) contains the list delimiter \"{delimiter}\""
    )]
    DelimiterInElement {
        /// List column
        column: String,
        /// Index of the offending record
        row: usize,
        /// The offending element
        element: String,
        /// Delimiter in use
        delimiter: String,
    },

    /// A list element is the empty string, which flattens like the empty list
    #[error("Column '{column}' (row {row}) contains an empty list element")]
    EmptyElement {
        /// List column
        column: String,
        /// Index of the offending record
        row: usize,
    },

    /// The query engine failed to evaluate the expression
    #[error("Query engine error: {0}")]
    Engine(String),
}

impl QueryError {
    /// Creates a new unknown column error.
    pub fn no_such_column(column: impl Into<String>) -> Self {
        Self::NoSuchColumn(column.into())
    }

    /// Creates a new syntax error.
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::QuerySyntax(message.into())
    }

    /// Creates a new engine error.
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine(message.into())
    }
}
