//! Loading a directory of spell documents into a record set.
//!
//! Every file with a supported extension is one record. A document that
//! cannot be parsed is skipped and reported in [`LoadOutcome::failures`];
//! only an unreadable directory aborts the load.

use crate::{DocumentFormat, ParserError, Result, detect_format, parse_record};
use spellbook_core::{Record, RecordSet, Value};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Options controlling how records are loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    /// Columns to sort by, in priority order
    pub sort_by: Vec<String>,

    /// File stem of the template document, never loaded
    pub template_stem: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            sort_by: vec!["nivel".to_string(), "nome".to_string()],
            template_stem: "_Template".to_string(),
        }
    }
}

impl LoadOptions {
    /// Replaces the sort columns.
    pub fn sort_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sort_by = columns.into_iter().map(Into::into).collect();
        self
    }
}

/// A document that was skipped.
#[derive(Debug)]
pub struct DocumentFailure {
    /// Path of the skipped document
    pub path: PathBuf,

    /// Why it was skipped
    pub error: ParserError,
}

/// Result of loading a directory.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Loaded records, sorted
    pub records: RecordSet,

    /// Documents that could not be parsed
    pub failures: Vec<DocumentFailure>,
}

impl LoadOutcome {
    /// Returns true if every document was loaded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Loads every spell document in `dir` (non-recursive).
pub fn load_records(dir: &Path, options: &LoadOptions) -> Result<LoadOutcome> {
    info!("Loading spell documents from {}", dir.display());

    let entries = std::fs::read_dir(dir).map_err(|source| ParserError::ReadDirectory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut documents: Vec<(PathBuf, DocumentFormat)> = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| ParserError::ReadDirectory {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        if !path.is_file() || is_template(&path, &options.template_stem) {
            continue;
        }
        match detect_format(&path) {
            Ok(format) => documents.push((path, format)),
            Err(_) => debug!("Ignoring {}", path.display()),
        }
    }
    documents.sort_by(|(a, _), (b, _)| a.file_name().cmp(&b.file_name()));

    let mut records = Vec::with_capacity(documents.len());
    let mut failures = Vec::new();
    for (path, format) in documents {
        match read_document(&path, format) {
            Ok(record) => records.push(record),
            Err(error) => {
                warn!("Skipping {}: {}", path.display(), error);
                failures.push(DocumentFailure { path, error });
            }
        }
    }

    // Stable: ties keep file-name order.
    records.sort_by(|a, b| compare_records(a, b, &options.sort_by));

    info!(
        "Loaded {} record(s), skipped {} document(s)",
        records.len(),
        failures.len()
    );

    Ok(LoadOutcome {
        records: RecordSet::from_records(records),
        failures,
    })
}

fn is_template(path: &Path, template_stem: &str) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem == template_stem)
}

fn read_document(path: &Path, format: DocumentFormat) -> Result<Record> {
    let content = std::fs::read_to_string(path)?;
    parse_record(&content, format).map_err(|e| ParserError::malformed(path, e.to_string()))
}

fn compare_records(a: &Record, b: &Record, sort_by: &[String]) -> Ordering {
    sort_by
        .iter()
        .map(|column| compare_values(a.get(column), b.get(column)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Nulls first, then numbers, then everything else by display form.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Int(_) | Value::Float(_)) => 1,
            Some(_) => 2,
        }
    }

    match (a, b) {
        (Some(a), Some(b)) if rank(Some(a)) == rank(Some(b)) => {
            match (a.as_float(), b.as_float()) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                _ => a.to_string().cmp(&b.to_string()),
            }
        }
        _ => rank(a).cmp(&rank(b)),
    }
}
