//! Builder pattern for creating schemas.
//!
//! This module provides ergonomic builders for constructing schemas and
//! their column declarations with a fluent API.

use crate::{Check, ColumnSpec, Schema, Value, ValueType};

/// Builder for creating a `Schema`.
///
/// # Example
///
/// ```rust
/// use spellbook_core::{ColumnBuilder, SchemaBuilder, ValueType};
///
/// let schema = SchemaBuilder::new("spells", "nome")
///     .column(ColumnBuilder::new("nome", ValueType::String).unique(true).build())
///     .build();
/// assert_eq!(schema.columns.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    name: Option<String>,
    key_column: Option<String>,
    columns: Vec<ColumnSpec>,
}

impl SchemaBuilder {
    /// Creates a new schema builder.
    ///
    /// # Arguments
    ///
    /// * `name` - Record type name
    /// * `key_column` - Column holding the natural identifier
    pub fn new(name: impl Into<String>, key_column: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            key_column: Some(key_column.into()),
            columns: Vec::new(),
        }
    }

    /// Adds a column declaration.
    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds multiple column declarations.
    pub fn columns(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Builds the schema.
    ///
    /// # Panics
    ///
    /// Panics if the name or key column is not set.
    pub fn build(self) -> Schema {
        Schema {
            name: self.name.expect("name is required"),
            key_column: self.key_column.expect("key_column is required"),
            columns: self.columns,
        }
    }
}

/// Builder for creating a `ColumnSpec`.
///
/// Columns are non-nullable and non-unique unless stated otherwise.
///
/// # Example
///
/// ```rust
/// use spellbook_core::{Check, ColumnBuilder, ValueType};
///
/// let column = ColumnBuilder::new("nivel", ValueType::Integer)
///     .check(Check::Range { min: Some(0.0), max: Some(9.0) })
///     .build();
/// assert!(!column.nullable);
/// ```
#[derive(Debug)]
pub struct ColumnBuilder {
    name: String,
    value_type: ValueType,
    nullable: bool,
    unique: bool,
    default: Option<Value>,
    checks: Vec<Check>,
    description: Option<String>,
}

impl ColumnBuilder {
    /// Creates a new column builder.
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            nullable: false,
            unique: false,
            default: None,
            checks: Vec::new(),
            description: None,
        }
    }

    /// Sets whether the column is nullable.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Sets whether the column values must be unique.
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Sets the default value used for missing or null fields.
    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Adds a check to the column.
    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Sets the column description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builds the column declaration.
    pub fn build(self) -> ColumnSpec {
        ColumnSpec {
            name: self.name,
            value_type: self.value_type,
            nullable: self.nullable,
            unique: self.unique,
            default: self.default,
            checks: self.checks,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_schema_builder_minimal() {
        let schema = SchemaBuilder::new("spells", "nome").build();

        assert_eq!(schema.name, "spells");
        assert_eq!(schema.key_column, "nome");
        assert!(schema.columns.is_empty());
    }

    #[test]
    fn test_column_builder_full() {
        let column = ColumnBuilder::new("source", ValueType::String)
            .nullable(true)
            .unique(false)
            .default_value("LDJ")
            .check(Check::IsIn {
                values: vec!["LDJ".to_string()],
            })
            .description("Book the spell comes from")
            .build();

        assert_eq!(column.name, "source");
        assert!(column.nullable);
        assert_eq!(column.default, Some(Value::from("LDJ")));
        assert_eq!(column.checks.len(), 1);
        assert_eq!(
            column.description,
            Some("Book the spell comes from".to_string())
        );
    }

    #[test]
    #[should_panic(expected = "key_column is required")]
    fn test_schema_builder_panic_missing_key() {
        let builder = SchemaBuilder {
            name: Some("spells".to_string()),
            ..Default::default()
        };
        builder.build();
    }
}
