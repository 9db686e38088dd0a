use anyhow::{Context, Result};
use spellbook_core::RecordSet;
use spellbook_parser::{read_filter_file, read_query_file};
use spellbook_query::QueryEngine;
use spellbook_render::DocumentTemplate;
use spellbook_validator::DataValidator;
use std::path::Path;
use tracing::info;

use super::{load_prepared, resolve_schema};
use crate::output;

/// What to export and how.
pub struct ExportOptions {
    pub filter_file: Option<String>,
    pub query_file: Option<String>,
    pub title: Option<String>,
    pub with_summary: bool,
    pub strict: bool,
}

pub async fn execute(
    dir: &str,
    output_path: &str,
    schema: Option<&str>,
    options: &ExportOptions,
) -> Result<()> {
    info!("Exporting spells in: {}", dir);

    let schema = resolve_schema(schema)?;
    let validator = DataValidator::new(schema.clone()).context("Invalid schema definition")?;
    let records = load_prepared(dir, &validator, options.strict)?;

    let engine = QueryEngine::new(schema);
    let selected = select(&engine, &records, options).await?;

    let mut template = DocumentTemplate::new().with_summary(options.with_summary);
    if let Some(title) = &options.title {
        template = template.title(title);
    }
    let latex = template.render(&selected);

    std::fs::write(output_path, latex)
        .with_context(|| format!("Failed to write: {}", output_path))?;

    output::print_success(&format!(
        "Exported {} spell(s) to {}",
        selected.len(),
        output_path
    ));
    Ok(())
}

async fn select(
    engine: &QueryEngine,
    records: &RecordSet,
    options: &ExportOptions,
) -> Result<RecordSet> {
    if let Some(path) = &options.filter_file {
        let spec = read_filter_file(Path::new(path))
            .with_context(|| format!("Failed to read filter file: {}", path))?;
        return engine.filter(records, &spec).context("Filter failed");
    }

    if let Some(path) = &options.query_file {
        let expression = read_query_file(Path::new(path))
            .with_context(|| format!("Failed to read query file: {}", path))?;
        return engine
            .query(records, &expression)
            .await
            .context("Query failed");
    }

    Ok(records.clone())
}
