//! Parsers for spellbook documents (JSON/YAML/TOML).
//!
//! This crate turns files on disk into the strongly-typed structures of
//! `spellbook_core`:
//!
//! - schema configuration documents → [`Schema`]
//! - filter documents → [`FilterSpec`]
//! - query files → [`QueryExpression`]
//! - a directory of spell documents → [`RecordSet`](spellbook_core::RecordSet)
//!   (see [`loader`])
//!
//! # Example
//!
//! ```rust
//! use spellbook_parser::parse_schema_yaml;
//!
//! let yaml = r#"
//! name: spells
//! key_column: nome
//! value_sets:
//!   escolas: [elemental, pura]
//! columns:
//!   - name: nome
//!     type: string
//!     unique: true
//!   - name: escola
//!     type: list
//!     checks:
//!       - type: list_subset_of
//!         value_set: escolas
//! columns_default_values:
//!   escola: []
//! "#;
//!
//! let schema = parse_schema_yaml(yaml).expect("Failed to parse schema");
//! assert_eq!(schema.name, "spells");
//! assert_eq!(schema.columns.len(), 2);
//! ```

pub mod loader;

pub use loader::{DocumentFailure, LoadOptions, LoadOutcome, load_records};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use spellbook_core::{
    Check, ColumnSpec, FilterSpec, QueryExpression, Record, Schema, SchemaError, Value, ValueType,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading spellbook documents.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The records directory cannot be listed
    #[error("Cannot read directory {}: {source}", .path.display())]
    ReadDirectory {
        /// Directory path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// A spell document is not a flat mapping of supported values
    #[error("Malformed document {}: {message}", .path.display())]
    MalformedDocument {
        /// Document path
        path: PathBuf,
        /// Why the document was rejected
        message: String,
    },

    /// A check references a value set the schema does not define
    #[error("Column '{column}' references unknown value set '{value_set}'")]
    UnknownValueSet {
        /// Column name
        column: String,
        /// Referenced value set
        value_set: String,
    },

    /// A check declaration cannot be read
    #[error("Invalid check on column '{column}': {message}")]
    InvalidCheck {
        /// Column name
        column: String,
        /// Deserialization message
        message: String,
    },

    /// `columns_default_values` names a column the schema does not declare
    #[error("Default value given for undeclared column '{0}'")]
    UnknownDefaultColumn(String),

    /// The resulting schema is not well-formed
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ParserError {
    /// Wraps any parse failure of the document at `path`.
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Detect the document format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.json` → `DocumentFormat::Json`
/// * `.yaml`, `.yml` → `DocumentFormat::Yaml`
/// * `.toml` → `DocumentFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<DocumentFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "json" => Ok(DocumentFormat::Json),
        "yaml" | "yml" => Ok(DocumentFormat::Yaml),
        "toml" => Ok(DocumentFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

fn deserialize<T: DeserializeOwned>(content: &str, format: DocumentFormat) -> Result<T> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(content)?),
        DocumentFormat::Yaml => Ok(serde_yaml_ng::from_str(content)?),
        DocumentFormat::Toml => {
            toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))
        }
    }
}

/// Schema configuration as written on disk.
#[derive(Debug, Deserialize)]
struct SchemaDocument {
    name: String,
    key_column: String,
    #[serde(default)]
    value_sets: BTreeMap<String, Vec<String>>,
    columns: Vec<ColumnDocument>,
    #[serde(default)]
    columns_default_values: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ColumnDocument {
    name: String,
    #[serde(rename = "type")]
    value_type: ValueType,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    unique: bool,
    #[serde(default)]
    default: Option<Value>,
    // Kept loose so `value_set` references can be resolved before the
    // check is read.
    #[serde(default)]
    checks: Vec<serde_json::Value>,
    #[serde(default)]
    description: Option<String>,
}

impl SchemaDocument {
    fn into_schema(self) -> Result<Schema> {
        let SchemaDocument {
            name,
            key_column,
            value_sets,
            columns,
            mut columns_default_values,
        } = self;

        let mut specs = Vec::with_capacity(columns.len());
        for column in columns {
            let checks = column
                .checks
                .into_iter()
                .map(|raw| resolve_check(&column.name, raw, &value_sets))
                .collect::<Result<Vec<_>>>()?;

            let default = columns_default_values
                .remove(&column.name)
                .or(column.default);

            specs.push(ColumnSpec {
                name: column.name,
                value_type: column.value_type,
                nullable: column.nullable,
                unique: column.unique,
                default,
                checks,
                description: column.description,
            });
        }

        if let Some(column) = columns_default_values.into_keys().next() {
            return Err(ParserError::UnknownDefaultColumn(column));
        }

        let schema = Schema {
            name,
            key_column,
            columns: specs,
        };
        schema.check_definition()?;
        Ok(schema)
    }
}

fn resolve_check(
    column: &str,
    mut raw: serde_json::Value,
    value_sets: &BTreeMap<String, Vec<String>>,
) -> Result<Check> {
    if let Some(object) = raw.as_object_mut() {
        if let Some(reference) = object.remove("value_set") {
            let value_set = reference.as_str().unwrap_or_default().to_string();
            let values = value_sets
                .get(&value_set)
                .ok_or_else(|| ParserError::UnknownValueSet {
                    column: column.to_string(),
                    value_set: value_set.clone(),
                })?;
            object.insert("values".to_string(), serde_json::json!(values));
        }
    }

    serde_json::from_value(raw).map_err(|e| ParserError::InvalidCheck {
        column: column.to_string(),
        message: e.to_string(),
    })
}

/// Parse a schema configuration from a string in the given format.
pub fn parse_schema(content: &str, format: DocumentFormat) -> Result<Schema> {
    let document: SchemaDocument = deserialize(content, format)?;
    document.into_schema()
}

/// Parse a schema configuration from a YAML string.
pub fn parse_schema_yaml(content: &str) -> Result<Schema> {
    parse_schema(content, DocumentFormat::Yaml)
}

/// Parse a schema configuration from a TOML string.
///
/// # Example
///
/// ```rust
/// use spellbook_parser::parse_schema_toml;
///
/// let toml = r#"
/// name = "spells"
/// key_column = "nome"
///
/// [[columns]]
/// name = "nome"
/// type = "string"
///
/// [[columns]]
/// name = "nivel"
/// type = "integer"
/// checks = [{ type = "range", min = 0, max = 9 }]
/// "#;
///
/// let schema = parse_schema_toml(toml).unwrap();
/// assert_eq!(schema.columns[1].checks.len(), 1);
/// ```
pub fn parse_schema_toml(content: &str) -> Result<Schema> {
    parse_schema(content, DocumentFormat::Toml)
}

/// Parse a schema configuration from a JSON string.
pub fn parse_schema_json(content: &str) -> Result<Schema> {
    parse_schema(content, DocumentFormat::Json)
}

/// Parse a schema configuration file with automatic format detection.
///
/// ```no_run
/// use spellbook_parser::parse_schema_file;
/// use std::path::Path;
///
/// let schema = parse_schema_file(Path::new("config/spells_schema.yml")).unwrap();
/// println!("Loaded schema: {}", schema.name);
/// ```
pub fn parse_schema_file(path: &Path) -> Result<Schema> {
    let content = std::fs::read_to_string(path)?;
    let format = detect_format(path)?;
    parse_schema(&content, format)
}

/// Parse a single spell document.
///
/// The document must be a mapping from field name to null, string, number,
/// boolean or list of strings.
pub fn parse_record(content: &str, format: DocumentFormat) -> Result<Record> {
    deserialize(content, format)
}

/// Parse a filter document: a mapping column → scalar or list.
pub fn parse_filter(content: &str, format: DocumentFormat) -> Result<FilterSpec> {
    deserialize(content, format)
}

/// Read a filter document with automatic format detection.
pub fn read_filter_file(path: &Path) -> Result<FilterSpec> {
    let content = std::fs::read_to_string(path)?;
    let format = detect_format(path)?;
    parse_filter(&content, format)
}

/// Read a query file. Lines are trimmed and joined with a single space.
pub fn read_query_file(path: &Path) -> Result<QueryExpression> {
    let content = std::fs::read_to_string(path)?;
    Ok(QueryExpression::from_lines(content.lines()))
}
