use anyhow::Result;
use colored::*;
use serde_json::json;
use spellbook_core::{ColumnError, Record, RecordSet, Schema, ValidationReport};
use spellbook_parser::DocumentFailure;

pub fn print_validation_report(report: &ValidationReport, format: &str) -> Result<()> {
    match format {
        "json" => print_json_report(report),
        _ => {
            print_text_report(report);
            Ok(())
        }
    }
}

fn print_text_report(report: &ValidationReport) {
    print!("{}", text_report(report));
}

/// Prints a text report to stderr, keeping stdout for the selected spells.
pub fn eprint_validation_report(report: &ValidationReport) {
    eprint!("{}", text_report(report));
}

fn text_report(report: &ValidationReport) -> String {
    let rule = "═".repeat(60);
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", rule));
    out.push_str(&format!("{}\n", "  VALIDATION REPORT".bold()));
    out.push_str(&format!("{}\n", rule));

    if report.is_valid() {
        out.push_str(&format!(
            "\n{} {}\n",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        ));
    } else {
        out.push_str(&format!(
            "\n{} {}\n",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        ));
    }

    if !report.column_errors().is_empty() {
        out.push_str(&format!("\n{}\n", "Errors:".red().bold()));
        for (i, error) in report.column_errors().iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, error.to_string().red()));
            if let ColumnError::ValueConstraint(error) = error {
                for line in error.table().lines() {
                    out.push_str(&format!("       {}\n", line));
                }
            }
        }
    }

    out.push_str(&format!("\n{}\n", "Summary:".bold()));
    out.push_str(&format!(
        "  Records validated: {}\n",
        report.stats.records_validated
    ));
    out.push_str(&format!(
        "  Columns checked:   {}\n",
        report.stats.columns_checked
    ));
    out.push_str(&format!(
        "  Checks evaluated:  {}\n",
        report.stats.checks_evaluated
    ));
    out.push_str(&format!(
        "  Total errors:      {}\n",
        report.column_errors().len()
    ));
    out.push_str(&format!("{}\n", rule));
    out
}

fn print_json_report(report: &ValidationReport) -> Result<()> {
    let output = json!({
        "passed": report.is_valid(),
        "errors": report.column_errors(),
        "summary": {
            "error_count": report.column_errors().len(),
            "failing_columns": report.failing_columns(),
        },
        "stats": report.stats,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Prints the spells left after a filter or query.
pub fn print_records(records: &RecordSet, schema: &Schema, format: &str) -> Result<()> {
    if format == "json" {
        let records: Vec<&Record> = records.iter().collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    print_info(&format!("{} spell(s) selected", records.len()));
    for record in records {
        let level = record
            .get("nivel")
            .map(ToString::to_string)
            .unwrap_or_default();
        println!("  {:>2}  {}", level.dimmed(), schema.natural_key(record));
    }
    Ok(())
}

pub fn print_document_failures(failures: &[DocumentFailure]) {
    for failure in failures {
        print_warning(&format!(
            "Skipped {}: {}",
            failure.path.display(),
            failure.error
        ));
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
