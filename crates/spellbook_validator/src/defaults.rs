//! Default filling and list normalisation.
//!
//! Both run before validation and never fail: they only repair what they
//! can and leave the rest for the validator to report.

use spellbook_core::{ColumnDefaults, RecordSet, Schema, Value};

/// Replaces missing and null values with the declared defaults.
///
/// A column whose default is a list also has its non-list values replaced.
/// A column absent from every record receives the default in every record.
/// The input set is left untouched.
///
/// # Example
///
/// ```rust
/// use spellbook_core::{ColumnDefaults, Record, RecordSet, Value};
/// use spellbook_validator::fill_defaults;
///
/// let records = RecordSet::from_records(vec![Record::from([(
///     "nome".to_string(),
///     Value::from("Luz"),
/// )])]);
/// let defaults = ColumnDefaults::new().with("dmg", "N/A");
///
/// let filled = fill_defaults(&records, &defaults);
/// assert_eq!(filled.records()[0]["dmg"], Value::from("N/A"));
/// assert!(!records.records()[0].contains_key("dmg"));
/// ```
pub fn fill_defaults(records: &RecordSet, defaults: &ColumnDefaults) -> RecordSet {
    records.map_records(|record| {
        let mut filled = record.clone();
        for (column, default) in defaults.iter() {
            let replace = match filled.get(column) {
                None | Some(Value::Null) => true,
                Some(value) => default.is_list() && !value.is_list(),
            };
            if replace {
                filled.insert(column.to_string(), default.clone());
            }
        }
        filled
    })
}

/// Wraps bare strings held by list columns into one-element lists.
///
/// Spell documents often write a single school as `"escola": "pura"`
/// instead of `["pura"]`.
pub fn normalize_list_columns(records: &RecordSet, schema: &Schema) -> RecordSet {
    let list_columns = schema.list_columns();

    records.map_records(|record| {
        let mut normalized = record.clone();
        for column in &list_columns {
            if let Some(Value::String(single)) = normalized.get(*column) {
                let wrapped = Value::List(vec![single.clone()]);
                normalized.insert(column.to_string(), wrapped);
            }
        }
        normalized
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use spellbook_core::{ColumnBuilder, Record, SchemaBuilder, ValueType};

    fn record(fields: &[(&str, Value)]) -> Record {
        fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_fill_missing_and_null() {
        let records = RecordSet::from_records(vec![
            record(&[("nome", "Luz".into())]),
            record(&[("nome", "Escudo".into()), ("dmg", Value::Null)]),
            record(&[("nome", "Bola de Fogo".into()), ("dmg", "8d6".into())]),
        ]);
        let defaults = ColumnDefaults::new().with("dmg", "N/A");

        let filled = fill_defaults(&records, &defaults);

        let dmg: Vec<String> = filled.iter().map(|r| r["dmg"].to_string()).collect();
        assert_eq!(dmg, vec!["N/A", "N/A", "8d6"]);
    }

    #[test]
    fn test_fill_replaces_non_list_in_list_column() {
        let records = RecordSet::from_records(vec![
            record(&[("elementos", Value::Float(f64::NAN))]),
            record(&[("elementos", vec!["fogo"].into())]),
        ]);
        let defaults = ColumnDefaults::new().with("elementos", Vec::<String>::new());

        let filled = fill_defaults(&records, &defaults);

        assert_eq!(filled.records()[0]["elementos"], Value::List(vec![]));
        assert_eq!(filled.records()[1]["elementos"], Value::from(vec!["fogo"]));
    }

    #[test]
    fn test_fill_does_not_share_defaults() {
        let records = RecordSet::from_records(vec![record(&[]), record(&[])]);
        let defaults = ColumnDefaults::new().with("tags", vec!["dano"]);

        let filled = fill_defaults(&records, &defaults);
        let mut records = filled.into_records();
        if let Some(Value::List(tags)) = records[0].get_mut("tags") {
            tags.push("cura".to_string());
        }

        assert_eq!(records[1]["tags"], Value::from(vec!["dano"]));
    }

    #[test]
    fn test_normalize_wraps_bare_strings() {
        let schema = SchemaBuilder::new("spells", "nome")
            .column(ColumnBuilder::new("nome", ValueType::String).build())
            .column(ColumnBuilder::new("escola", ValueType::List).build())
            .build();
        let records = RecordSet::from_records(vec![
            record(&[("nome", "Luz".into()), ("escola", "pura".into())]),
            record(&[("nome", "Fogo".into()), ("escola", vec!["elemental"].into())]),
        ]);

        let normalized = normalize_list_columns(&records, &schema);

        assert_eq!(normalized.records()[0]["escola"], Value::from(vec!["pura"]));
        assert_eq!(
            normalized.records()[1]["escola"],
            Value::from(vec!["elemental"])
        );
        assert_eq!(normalized.records()[0]["nome"], Value::from("Luz"));
    }
}
