mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spellbook")]
#[command(version, about = "Spell collection validator, filter and exporter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a directory of spell documents against a schema
    Validate {
        /// Directory holding one document per spell
        dir: String,

        /// Schema configuration file (YAML, TOML or JSON)
        #[arg(long)]
        schema: Option<String>,

        /// Also fail when a document could not be loaded
        #[arg(short, long)]
        strict: bool,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check a schema configuration without loading any spell
    Check {
        /// Path to the schema file (YAML, TOML or JSON)
        schema: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Keep the spells matching a structured filter
    Filter {
        /// Directory holding one document per spell
        dir: String,

        /// Filter file mapping columns to accepted values
        #[arg(long = "filter")]
        filter_file: String,

        /// Schema configuration file (YAML, TOML or JSON)
        #[arg(long)]
        schema: Option<String>,

        /// Fail if the spells do not validate
        #[arg(short, long)]
        strict: bool,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Keep the spells for which a query expression holds
    Query {
        /// Directory holding one document per spell
        dir: String,

        /// File whose lines form the expression
        #[arg(long, conflicts_with = "expr", required_unless_present = "expr")]
        query_file: Option<String>,

        /// Expression given inline
        #[arg(short, long)]
        expr: Option<String>,

        /// Schema configuration file (YAML, TOML or JSON)
        #[arg(long)]
        schema: Option<String>,

        /// Fail if the spells do not validate
        #[arg(short, long)]
        strict: bool,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Render spells into a LaTeX document
    Export {
        /// Directory holding one document per spell
        dir: String,

        /// Output .tex file
        #[arg(short, long)]
        output: String,

        /// Only export the spells matching this filter file
        #[arg(long = "filter", conflicts_with = "query_file")]
        filter_file: Option<String>,

        /// Only export the spells matching this query file
        #[arg(long)]
        query_file: Option<String>,

        /// Schema configuration file (YAML, TOML or JSON)
        #[arg(long)]
        schema: Option<String>,

        /// Document title
        #[arg(short, long)]
        title: Option<String>,

        /// Leave out the summary chapter
        #[arg(long)]
        no_summary: bool,

        /// Fail if the spells do not validate
        #[arg(short, long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Validate {
            dir,
            schema,
            strict,
            format,
        } => commands::validate::execute(&dir, schema.as_deref(), strict, &format),

        Commands::Check { schema, format } => commands::check::execute(&schema, &format),

        Commands::Filter {
            dir,
            filter_file,
            schema,
            strict,
            format,
        } => commands::filter::execute(&dir, &filter_file, schema.as_deref(), strict, &format),

        Commands::Query {
            dir,
            query_file,
            expr,
            schema,
            strict,
            format,
        } => {
            let source = match (query_file, expr) {
                (Some(path), _) => commands::query::QuerySource::File(path),
                (None, Some(expression)) => commands::query::QuerySource::Inline(expression),
                (None, None) => anyhow::bail!("either --query-file or --expr is required"),
            };
            commands::query::execute(&dir, source, schema.as_deref(), strict, &format).await
        }

        Commands::Export {
            dir,
            output,
            filter_file,
            query_file,
            schema,
            title,
            no_summary,
            strict,
        } => {
            let options = commands::export::ExportOptions {
                filter_file,
                query_file,
                title,
                with_summary: !no_summary,
                strict,
            };
            commands::export::execute(&dir, &output, schema.as_deref(), &options).await
        }
    }
}
