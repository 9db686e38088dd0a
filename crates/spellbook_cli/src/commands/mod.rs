pub mod check;
pub mod export;
pub mod filter;
pub mod query;
pub mod validate;

use anyhow::{Context, Result};
use spellbook_core::{RecordSet, Schema, spells::spell_schema};
use spellbook_parser::{LoadOptions, LoadOutcome, load_records, parse_schema_file};
use spellbook_validator::DataValidator;
use std::path::Path;
use tracing::info;

use crate::output;

/// Environment variable naming the schema file used when `--schema` is absent.
pub const SCHEMA_ENV: &str = "SPELLBOOK_SCHEMA";

/// Resolves the schema: explicit path, then `SPELLBOOK_SCHEMA`, then the
/// built-in spell schema.
pub fn resolve_schema(path: Option<&str>) -> Result<Schema> {
    let path = path
        .map(str::to_string)
        .or_else(|| std::env::var(SCHEMA_ENV).ok().filter(|p| !p.is_empty()));

    match path {
        Some(path) => {
            info!("Using schema file: {}", path);
            parse_schema_file(Path::new(&path))
                .with_context(|| format!("Failed to parse schema file: {}", path))
        }
        None => {
            info!("Using built-in spell schema");
            Ok(spell_schema())
        }
    }
}

/// Loads the documents of `dir`, reporting the skipped ones.
pub fn load(dir: &str) -> Result<LoadOutcome> {
    let outcome = load_records(Path::new(dir), &LoadOptions::default())
        .with_context(|| format!("Failed to load spells from: {}", dir))?;
    output::print_document_failures(&outcome.failures);
    Ok(outcome)
}

/// Loads and prepares the spells of `dir` for filtering or rendering.
///
/// The prepared spells are always validated and a failing report goes to
/// stderr. In strict mode a failing report also exits with status 1.
pub fn load_prepared(dir: &str, validator: &DataValidator, strict: bool) -> Result<RecordSet> {
    let outcome = load(dir)?;
    let records = validator.prepare(&outcome.records);

    if !records.is_empty() {
        let report = validator.validate(&records)?;
        if !report.is_valid() {
            output::eprint_validation_report(&report);
            if strict {
                output::print_error("Strict mode: spells do not match the schema");
                std::process::exit(1);
            }
            output::print_warning("Continuing with spells that do not match the schema");
        }
    }

    Ok(records)
}
