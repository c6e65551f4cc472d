//! Command-line interface for the camt.052 parser.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use serde::Serialize;

use crate::config::{DuplicatePolicy, ParseOptions, DEFAULT_MAX_INPUT_SIZE};
use crate::error::{CamtError, Result};
use crate::output::{render_json, to_tree, write_output, OutputFormat};
use crate::parse_file_with_options;
use crate::types::Document;

/// camt-parser - Convert camt.052 account reports to JSON or YAML.
#[derive(Parser)]
#[command(name = "camt-parser")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a report and print it as a generic tree.
    Parse {
        /// Path to the camt.052 XML file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail on repeated singular elements instead of keeping the last one
        #[arg(long)]
        reject_duplicates: bool,

        /// Maximum input size in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_INPUT_SIZE)]
        max_size: u64,
    },

    /// Validate a report and print a short summary.
    Check {
        /// Path to the camt.052 XML file
        file: PathBuf,

        /// Fail on repeated singular elements instead of keeping the last one
        #[arg(long)]
        reject_duplicates: bool,

        /// Maximum input size in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_INPUT_SIZE)]
        max_size: u64,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Short description of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub message_identification: String,
    pub page_number: Option<i64>,
    pub reports: usize,
    pub balances: usize,
    pub entries: usize,
}

impl Summary {
    /// Summarize a parsed document.
    #[must_use]
    pub fn of(document: &Document) -> Self {
        Self {
            message_identification: document.group_header.message_identification.clone(),
            page_number: document
                .group_header
                .message_pagination
                .map(|p| p.page_number),
            reports: document.reports.len(),
            balances: document.reports.iter().map(|r| r.balances.len()).sum(),
            entries: document.entry_count(),
        }
    }
}

fn parse_options(reject_duplicates: bool, max_size: u64) -> ParseOptions {
    let policy = if reject_duplicates {
        DuplicatePolicy::Reject
    } else {
        DuplicatePolicy::LastWins
    };
    ParseOptions::new()
        .with_duplicate_policy(policy)
        .with_max_input_size(max_size)
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            file,
            format,
            output,
            reject_duplicates,
            max_size,
        } => parse_command(
            &file,
            format,
            output.as_deref(),
            parse_options(reject_duplicates, max_size),
        ),
        Commands::Check {
            file,
            reject_duplicates,
            max_size,
            json,
        } => check_command(&file, parse_options(reject_duplicates, max_size), json),
    }
}

/// Execute the parse command.
fn parse_command(
    file: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    options: ParseOptions,
) -> Result<()> {
    // Validate output directory before parsing
    if let Some(parent) = output.and_then(Path::parent) {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(CamtError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Output directory does not exist: {}", parent.display()),
            )));
        }
    }

    let document = parse_file_with_options(file, options)?;
    let tree = to_tree(&document);
    write_output(&tree, format, output)?;

    if let Some(path) = output {
        println!("{} {}", style("Saved to:").green().bold(), path.display());
    }

    Ok(())
}

/// Execute the check command.
fn check_command(file: &Path, options: ParseOptions, json: bool) -> Result<()> {
    let document = parse_file_with_options(file, options)?;
    let summary = Summary::of(&document);

    if json {
        let value = serde_json::to_value(&summary)?;
        println!("{}", render_json(&value)?);
        return Ok(());
    }

    println!(
        "{} {}",
        style("Valid camt.052 report").green().bold(),
        style(file.display()).cyan()
    );
    println!("  Message: {}", style(&summary.message_identification).green());
    if let Some(page) = summary.page_number {
        println!("  Page: {page}");
    }
    println!("  Reports: {}", summary.reports);
    println!("  Balances: {}", summary.balances);
    println!("  Entries: {}", summary.entries);

    Ok(())
}
