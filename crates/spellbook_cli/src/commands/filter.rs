use anyhow::{Context, Result};
use spellbook_parser::read_filter_file;
use spellbook_query::QueryEngine;
use spellbook_validator::DataValidator;
use std::path::Path;
use tracing::info;

use super::{load_prepared, resolve_schema};
use crate::output;

pub fn execute(
    dir: &str,
    filter_path: &str,
    schema: Option<&str>,
    strict: bool,
    format: &str,
) -> Result<()> {
    info!("Filtering spells in: {}", dir);

    let spec = read_filter_file(Path::new(filter_path))
        .with_context(|| format!("Failed to read filter file: {}", filter_path))?;

    let schema = resolve_schema(schema)?;
    let validator = DataValidator::new(schema.clone()).context("Invalid schema definition")?;
    let records = load_prepared(dir, &validator, strict)?;

    let engine = QueryEngine::new(schema);
    let selected = engine
        .filter(&records, &spec)
        .context("Filter failed")?;

    output::print_records(&selected, engine.schema(), format)
}
