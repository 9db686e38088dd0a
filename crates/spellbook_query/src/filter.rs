//! Structured filtering.
//!
//! A [`FilterSpec`] is applied one column at a time, in the spec's order.
//! Within a column the accepted values are alternatives; across columns the
//! conditions all have to hold.

use crate::QueryError;
use spellbook_core::{FilterSpec, RecordSet, Schema, Value, ValueType};
use tracing::debug;

/// Reduces `records` to those matching every entry of `spec`.
///
/// Values of scalar columns match when they equal one of the accepted values
/// (numbers numerically, everything else by string form). Values of list
/// columns match when they contain one of the accepted values; a bare string
/// there counts as a one-element list. Surviving records keep their relative
/// order; an empty spec returns a copy of the input.
///
/// # Errors
///
/// Returns [`QueryError::NoSuchColumn`] if the spec names a column the
/// schema does not declare. Nothing is filtered in that case.
///
/// # Example
///
/// ```rust
/// use spellbook_core::{FilterSpec, Record, RecordSet, Value, spells::spell_schema};
/// use spellbook_query::filter;
///
/// let records = RecordSet::from_records(vec![
///     Record::from([("escola".to_string(), Value::from(vec!["elemental"]))]),
///     Record::from([("escola".to_string(), Value::from(vec!["pura"]))]),
/// ]);
/// let spec = FilterSpec::new().with_value("escola", "elemental");
///
/// let filtered = filter(&records, &spec, &spell_schema()).unwrap();
/// assert_eq!(filtered.len(), 1);
/// ```
pub fn filter(
    records: &RecordSet,
    spec: &FilterSpec,
    schema: &Schema,
) -> Result<RecordSet, QueryError> {
    let mut columns = Vec::with_capacity(spec.len());
    for (column, accepted) in spec.iter() {
        let spec_column = schema
            .column(column)
            .ok_or_else(|| QueryError::no_such_column(column))?;
        columns.push((column, spec_column.value_type, accepted));
    }

    let mut current = records.clone();
    for (column, value_type, accepted) in columns {
        current = current.filtered(|record| {
            matches_any(
                record.get(column).unwrap_or(&Value::Null),
                value_type,
                accepted,
            )
        });
        debug!(
            "Filter on '{}' ({} value(s)): {} record(s) left",
            column,
            accepted.len(),
            current.len()
        );
    }

    Ok(current)
}

fn matches_any(value: &Value, value_type: ValueType, accepted: &[Value]) -> bool {
    let equals_accepted =
        |item: &Value| accepted.iter().any(|candidate| item.loosely_equals(candidate));

    match (value_type, value) {
        (ValueType::List, Value::List(items)) => items
            .iter()
            .any(|item| equals_accepted(&Value::String(item.clone()))),
        (ValueType::List, Value::Null) => false,
        (_, scalar) => equals_accepted(scalar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use spellbook_core::{ColumnBuilder, Record, SchemaBuilder, ValueType};

    fn schema() -> Schema {
        SchemaBuilder::new("spells", "nome")
            .column(ColumnBuilder::new("nome", ValueType::String).build())
            .column(ColumnBuilder::new("nivel", ValueType::Integer).build())
            .column(ColumnBuilder::new("escola", ValueType::List).build())
            .column(ColumnBuilder::new("ritual", ValueType::Boolean).build())
            .build()
    }

    fn spell(nome: &str, nivel: i64, escola: &[&str], ritual: bool) -> Record {
        Record::from([
            ("nome".to_string(), Value::from(nome)),
            ("nivel".to_string(), Value::Int(nivel)),
            ("escola".to_string(), Value::from(escola.to_vec())),
            ("ritual".to_string(), Value::Bool(ritual)),
        ])
    }

    fn records() -> RecordSet {
        RecordSet::from_records(vec![
            spell("Luz", 0, &["pura"], false),
            spell("Escudo", 1, &["pura", "espiritual"], false),
            spell("Alarme", 1, &["invocação"], true),
            spell("Bola de Fogo", 3, &["elemental"], false),
        ])
    }

    fn names(records: &RecordSet) -> Vec<String> {
        records.iter().map(|r| r["nome"].to_string()).collect()
    }

    #[test]
    fn test_scalar_membership() {
        let spec = FilterSpec::new().with("nivel", [0, 3]);
        let filtered = filter(&records(), &spec, &schema()).unwrap();
        assert_eq!(names(&filtered), vec!["Luz", "Bola de Fogo"]);
    }

    #[test]
    fn test_list_membership() {
        let spec = FilterSpec::new().with("escola", ["espiritual", "elemental"]);
        let filtered = filter(&records(), &spec, &schema()).unwrap();
        assert_eq!(names(&filtered), vec!["Escudo", "Bola de Fogo"]);
    }

    #[test]
    fn test_conjunction_across_columns() {
        let spec = FilterSpec::new()
            .with_value("nivel", 1)
            .with_value("ritual", true);
        let filtered = filter(&records(), &spec, &schema()).unwrap();
        assert_eq!(names(&filtered), vec!["Alarme"]);
    }

    #[test]
    fn test_string_filter_value_matches_integer() {
        let spec = FilterSpec::new().with_value("nivel", "1");
        let filtered = filter(&records(), &spec, &schema()).unwrap();
        assert_eq!(names(&filtered), vec!["Escudo", "Alarme"]);
    }

    #[test]
    fn test_empty_spec_is_identity() {
        let records = records();
        assert_eq!(filter(&records, &FilterSpec::new(), &schema()).unwrap(), records);
    }

    #[test]
    fn test_bare_string_in_list_column() {
        let mut record = spell("Raio", 1, &[], false);
        record.insert("escola".to_string(), Value::from("elemental"));
        let records = RecordSet::from_records(vec![record, spell("Luz", 0, &["pura"], false)]);

        let spec = FilterSpec::new().with_value("escola", "elemental");
        let filtered = filter(&records, &spec, &schema()).unwrap();
        assert_eq!(names(&filtered), vec!["Raio"]);
    }

    #[test]
    fn test_list_value_in_scalar_column_is_not_membership() {
        let mut record = spell("Estranha", 1, &["pura"], false);
        record.insert("nome".to_string(), Value::from(vec!["Luz", "Sombra"]));
        let records = RecordSet::from_records(vec![record, spell("Luz", 0, &["pura"], false)]);

        let spec = FilterSpec::new().with_value("nome", "Luz");
        let filtered = filter(&records, &spec, &schema()).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records()[0]["nivel"], Value::Int(0));
    }

    #[test]
    fn test_unknown_column() {
        let spec = FilterSpec::new()
            .with_value("nivel", 1)
            .with_value("cor", "azul");
        assert!(matches!(
            filter(&records(), &spec, &schema()),
            Err(QueryError::NoSuchColumn(column)) if column == "cor"
        ));
    }
}
