use anyhow::{Context, Result};
use spellbook_core::QueryExpression;
use spellbook_parser::read_query_file;
use spellbook_query::QueryEngine;
use spellbook_validator::DataValidator;
use std::path::Path;
use tracing::info;

use super::{load_prepared, resolve_schema};
use crate::output;

/// Where the query expression comes from.
pub enum QuerySource {
    File(String),
    Inline(String),
}

impl QuerySource {
    pub fn read(&self) -> Result<QueryExpression> {
        match self {
            QuerySource::File(path) => read_query_file(Path::new(path))
                .with_context(|| format!("Failed to read query file: {}", path)),
            QuerySource::Inline(expression) => Ok(QueryExpression::new(expression.as_str())),
        }
    }
}

pub async fn execute(
    dir: &str,
    source: QuerySource,
    schema: Option<&str>,
    strict: bool,
    format: &str,
) -> Result<()> {
    info!("Querying spells in: {}", dir);

    let expression = source.read()?;

    let schema = resolve_schema(schema)?;
    let validator = DataValidator::new(schema.clone()).context("Invalid schema definition")?;
    let records = load_prepared(dir, &validator, strict)?;

    let engine = QueryEngine::new(schema);
    let selected = engine
        .query(&records, &expression)
        .await
        .context("Query failed")?;

    output::print_records(&selected, engine.schema(), format)
}
