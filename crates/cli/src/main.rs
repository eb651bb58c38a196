//! # sheetdate-cli
//!
//! Command-line interface for sheetdate: load a workbook, find the date
//! columns of the "user details" sheet and print them normalized.

mod render;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use colored::Colorize;
use sheetdate_core::{
    DateError, DateSystem, LocatorOptions, NormalizeOptions, Pipeline, PipelineOptions,
    SerialZone, DEFAULT_KEYWORD, DEFAULT_OUTPUT_FORMAT, DEFAULT_SHEET_NAME,
};
use sheetdate_sheet::{Book, FileLoadOptions};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// sheetdate - Normalize the date columns of a spreadsheet
#[derive(Parser)]
#[command(name = "sheetdate")]
#[command(author, version, about = "Normalize spreadsheet date columns", long_about = None)]
struct Cli {
    /// Workbook to read (xlsx, xlsm, xlsb, xls, ods, csv, tsv)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Sheet to process (matched case-insensitively)
    #[arg(short = 's', long = "sheet", default_value = DEFAULT_SHEET_NAME)]
    sheet: String,

    /// Header keyword marking date columns
    #[arg(short = 'k', long = "keyword", default_value = DEFAULT_KEYWORD)]
    keyword: String,

    /// Output format (json, csv, table)
    #[arg(short = 'f', long = "format", default_value = "table")]
    format: OutputFormat,

    /// Timezone for serial dates (local, utc, or an offset like +05:30)
    #[arg(long = "tz", default_value = "local")]
    tz: SerialZone,

    /// Serial date system (1900 or 1904); read from the workbook when omitted
    #[arg(long = "date-system")]
    date_system: Option<DateSystem>,

    /// Date supplying fields a pattern leaves out (defaults to today)
    #[arg(long = "reference-date", value_name = "YYYY-MM-DD")]
    reference_date: Option<NaiveDate>,

    /// Extra pattern tried after the built-in ones (repeatable)
    #[arg(short = 'p', long = "pattern", value_name = "TEMPLATE")]
    patterns: Vec<String>,

    /// strftime format for normalized dates
    #[arg(long = "output-format", default_value = DEFAULT_OUTPUT_FORMAT)]
    output_format: String,

    /// Disable colored output
    #[arg(long = "no-color")]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output format for results.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Pretty table output (default)
    #[default]
    Table,
}

impl Cli {
    fn pipeline_options(&self) -> PipelineOptions {
        let mut normalize = NormalizeOptions::default()
            .with_zone(self.tz)
            .with_output_format(&self.output_format);
        if let Some(system) = self.date_system {
            normalize = normalize.with_date_system(system);
        }
        if let Some(date) = self.reference_date {
            normalize = normalize.with_reference_date(date);
        }
        for template in &self.patterns {
            normalize = normalize.with_pattern(template);
        }

        PipelineOptions::default()
            .with_sheet_name(&self.sheet)
            .with_locator(LocatorOptions::default().with_keyword(&self.keyword))
            .with_normalize(normalize)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            exit_code(&e)
        }
    }
}

/// Load, process and print one workbook.
fn run(cli: &Cli) -> Result<()> {
    let pipeline = Pipeline::new(cli.pipeline_options())?;

    let book = Book::from_path(&cli.file, &FileLoadOptions::default())
        .with_context(|| format!("Failed to read workbook: {}", cli.file.display()))?;
    tracing::debug!(
        "Loaded '{}' with {} sheet(s): {:?}",
        cli.file.display(),
        book.sheet_count(),
        book.sheet_names()
    );

    let processed = pipeline.run(&book)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render::render(&mut out, &processed, cli.format, !cli.no_color)?;
    out.flush()?;

    Ok(())
}

/// A missing header row exits with 2 so scripts can tell it apart from
/// unreadable input.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<DateError>() {
        Some(DateError::HeaderNotFound { .. }) => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}
