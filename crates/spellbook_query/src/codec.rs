//! Flattening of list columns into delimited strings and back.
//!
//! The query engine sees list columns as plain strings, so that expressions
//! such as `escola LIKE '%elemental%'` work on them.

use crate::QueryError;
use spellbook_core::{RecordSet, Schema, Value};

/// Delimiter placed between the elements of a flattened list.
pub const LIST_DELIMITER: &str = ", ";

/// Joins list elements with [`LIST_DELIMITER`].
///
/// # Errors
///
/// Returns [`QueryError::DelimiterInElement`] if an element contains the
/// delimiter and [`QueryError::EmptyElement`] if an element is empty, since
/// splitting either back would not give the same list.
pub fn join_list(column: &str, row: usize, items: &[String]) -> Result<String, QueryError> {
    if items.iter().any(String::is_empty) {
        return Err(QueryError::EmptyElement {
            column: column.to_string(),
            row,
        });
    }
    if let Some(element) = items.iter().find(|item| item.contains(LIST_DELIMITER)) {
        return Err(QueryError::DelimiterInElement {
            column: column.to_string(),
            row,
            element: element.clone(),
            delimiter: LIST_DELIMITER.to_string(),
        });
    }
    Ok(items.join(LIST_DELIMITER))
}

/// Splits a flattened list. The empty string is the empty list.
pub fn split_list(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(LIST_DELIMITER).map(str::to_string).collect()
}

/// Flattens every list value of the schema's list columns.
pub fn join_list_columns(records: &RecordSet, schema: &Schema) -> Result<RecordSet, QueryError> {
    let list_columns = schema.list_columns();
    let mut joined = Vec::with_capacity(records.len());

    for (row, record) in records.iter().enumerate() {
        let mut flat = record.clone();
        for column in &list_columns {
            if let Some(Value::List(items)) = record.get(*column) {
                flat.insert(column.to_string(), Value::String(join_list(column, row, items)?));
            }
        }
        joined.push(flat);
    }

    Ok(RecordSet::from_records(joined))
}
