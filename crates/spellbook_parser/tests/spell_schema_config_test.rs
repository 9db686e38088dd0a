//! The shipped schema configuration and the built-in spell schema agree.

use pretty_assertions::assert_eq;
use spellbook_core::spells::spell_schema;
use spellbook_parser::parse_schema_file;
use std::path::PathBuf;

fn config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/spells_schema.yml")
}

#[test]
fn test_config_matches_builtin_schema() {
    let parsed = parse_schema_file(&config_path()).unwrap();
    assert_eq!(parsed, spell_schema());
}

#[test]
fn test_config_resolves_value_sets_and_defaults() {
    let schema = parse_schema_file(&config_path()).unwrap();

    let source = schema.column("source").unwrap();
    assert_eq!(source.checks[0].name(), "isin");

    let defaults = schema.column_defaults();
    assert_eq!(defaults.len(), 7);
    assert_eq!(defaults.get("dmg").and_then(|v| v.as_str()), Some("N/A"));
}
