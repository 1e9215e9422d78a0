//! CLI entry point for `sheet_refinery`.

mod cli;

use anyhow::{Context as _, Result};
use clap::Parser;
use cli::Cli;
use sheet_refinery::config::ExportConfig;
use sheet_refinery::logging;
use sheet_refinery::pipeline::{self, Conversion};
use sheet_refinery::spreadsheet::Spreadsheet;
use std::process::ExitCode;
use tracing::{info, warn};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(error) = logging::init(cli.verbose) {
        eprintln!("Cannot initialize logging: {error:#}");
    }
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let base = match &cli.config {
        Some(path) => ExportConfig::from_file(path)?,
        None => ExportConfig::default(),
    };
    let config = cli.export_config(base);
    config.validate()?;

    let path = &cli.file;
    let mut workbook =
        Spreadsheet::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let sheet_names = workbook.sheet_names();
    if cli.list_sheets {
        for name in &sheet_names {
            println!("{name}");
        }
        return Ok(());
    }

    let criteria = cli.criteria();
    let sheet_name = criteria.select(&sheet_names)?.to_owned();
    if sheet_names.len() == 1 {
        info!(sheet = %sheet_name, "Single sheet detected");
    }
    let table = workbook
        .load_table(&sheet_name)
        .with_context(|| format!("Failed to load sheet '{sheet_name}'"))?;

    let size = std::fs::metadata(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .len();
    println!("== Data overview: {sheet_name}");
    println!("Total rows:    {}", table.row_count());
    println!("Total columns: {}", table.column_count());
    println!("Data size:     {:.1} KB", size as f64 / 1024.0);
    println!();
    println!("== Raw data (first {} rows)", config.preview_rows);
    println!("{}", pipeline::format_rows(&table, config.preview_rows));

    let conversion = pipeline::convert(&table, &cli.selection(), &config)?;
    print_report(&conversion);
    print_preview(&conversion, &config)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = pipeline::output_stem(&file_name, &sheet_name, sheet_names.len());
    let files = pipeline::write_outputs(&config.output_dir, &stem, &conversion)?;
    println!();
    println!("JSON written to {}", files.json.display());
    println!("SQL written to  {}", files.sql.display());
    Ok(())
}

fn print_report(conversion: &Conversion) {
    let report = &conversion.report;
    println!();
    println!("== Cleaning");
    println!("Retained rows:  {}", report.retained_rows);
    println!("Dropped rows:   {}", report.dropped_rows);
    println!("Retention rate: {:.1}%", report.retention_rate);
    if report.dropped_rows > 0 {
        warn!(
            dropped = report.dropped_rows,
            "Removed rows containing invalid data (NA, null, empty, ns)"
        );
    }
}

fn print_preview(conversion: &Conversion, config: &ExportConfig) -> Result<()> {
    let preview = conversion.preview(config)?;
    println!();
    println!("== Cleaned data (first {} rows)", config.preview_rows);
    println!("{}", pipeline::format_rows(&conversion.cleaned, config.preview_rows));
    println!();
    println!("== JSON preview (first {} rows)", config.preview_rows);
    println!("{}", preview.json);
    println!();
    println!("== CREATE TABLE");
    print!("{}", preview.sql.create);
    println!();
    println!("== INSERT INTO (first {} rows)", config.preview_rows);
    println!("{}", preview.sql.inserts);
    Ok(())
}
