use anyhow::{Context, Result};
use spellbook_parser::parse_schema_file;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(schema_path: &str, format: &str) -> Result<()> {
    info!("Checking schema: {}", schema_path);

    let path = Path::new(schema_path);
    let schema = parse_schema_file(path)
        .with_context(|| format!("Failed to parse schema file: {}", schema_path))?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    output::print_success("Schema definition is valid");

    println!("\nSchema Summary:");
    println!("  Name:       {}", schema.name);
    println!("  Key column: {}", schema.key_column);
    println!("  Columns:    {}", schema.columns.len());

    let lists = schema.list_columns();
    if !lists.is_empty() {
        println!("  Lists:      {}", lists.join(", "));
    }

    let defaults = schema.column_defaults();
    if !defaults.is_empty() {
        println!("\nDefaults:");
        for (column, value) in defaults.iter() {
            println!("  {:<18} {}", column, value);
        }
    }

    println!("\nColumns:");
    for column in &schema.columns {
        let mut flags = vec![column.value_type.to_string()];
        if column.nullable {
            flags.push("nullable".to_string());
        }
        if column.unique {
            flags.push("unique".to_string());
        }
        flags.extend(column.checks.iter().map(|check| check.name()));
        println!("  {:<18} {}", column.name, flags.join(", "));
    }

    Ok(())
}
