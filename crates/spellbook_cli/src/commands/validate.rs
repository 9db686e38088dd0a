use anyhow::{Context, Result};
use spellbook_validator::DataValidator;
use tracing::info;

use super::{load, resolve_schema};
use crate::output;

pub fn execute(dir: &str, schema: Option<&str>, strict: bool, format: &str) -> Result<()> {
    info!("Validating spells in: {}", dir);
    info!("Strict mode: {}", strict);

    let schema = resolve_schema(schema)?;
    let validator = DataValidator::new(schema).context("Invalid schema definition")?;

    let outcome = load(dir)?;
    if format != "json" {
        output::print_info(&format!(
            "Loaded {} spell(s) for schema '{}'",
            outcome.records.len(),
            validator.schema().name
        ));
    }

    let records = validator.prepare(&outcome.records);
    let report = validator
        .validate(&records)
        .with_context(|| format!("Nothing to validate in: {}", dir))?;

    output::print_validation_report(&report, format)?;

    if !report.is_valid() || (strict && !outcome.is_complete()) {
        std::process::exit(1);
    }

    Ok(())
}
