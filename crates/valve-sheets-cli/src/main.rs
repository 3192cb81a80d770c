//! Valve Sheets CLI - compile valve temperature reports into one workbook

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use valve_sheets::options::{DEFAULT_OUTPUT, DEFAULT_SOURCE_DIR};
use valve_sheets::prelude::*;
use valve_sheets::{select_sheets, CellAddress, ReportReader};

#[derive(Parser)]
#[command(name = "valve")]
#[command(
    author,
    version,
    about = "Compile valve temperature test reports into a summary workbook"
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append one column per report to the IN/EX sheets of the output workbook
    Compile {
        /// Directory holding the report workbooks
        #[arg(short, long, default_value = DEFAULT_SOURCE_DIR)]
        source: PathBuf,

        /// Output workbook, extended if it already exists
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Report file extension, repeatable (default: xls)
        #[arg(short, long = "extension", value_name = "EXT")]
        extensions: Vec<String>,

        /// First output column that may receive a report
        #[arg(long, default_value = "B")]
        start_column: String,

        /// Output row holding report labels (1-based)
        #[arg(long, default_value_t = 4)]
        header_row: u32,
    },

    /// Show the sheets, face blocks and summaries found in one report
    Inspect {
        /// Report workbook
        report: PathBuf,

        /// Print the summaries as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the sheets of a report and the direction each is read as
    Sheets {
        /// Report workbook
        report: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Compile {
            source,
            output,
            extensions,
            start_column,
            header_row,
        } => run_compile(source, output, extensions, &start_column, header_row),
        Commands::Inspect { report, json } => inspect(&report, json),
        Commands::Sheets { report } => list_sheets(&report),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_compile(
    source: PathBuf,
    output: PathBuf,
    extensions: Vec<String>,
    start_column: &str,
    header_row: u32,
) -> Result<()> {
    let first_column = CellAddress::letters_to_column(start_column)
        .with_context(|| format!("Invalid start column '{}'", start_column))?;
    let header_row = CellAddress::row_from_number(header_row)
        .with_context(|| format!("Invalid header row {}", header_row))?;

    let mut options = CompileOptions::new(source, output)
        .with_summary(SummaryLayout::starting_at(header_row, first_column));
    if !extensions.is_empty() {
        options = options.with_extensions(&extensions);
    }
    debug!(?options, "compile options");

    let output = options.output.clone();
    let mut compiler = Compiler::open(options).context("Failed to prepare output workbook")?;
    let stats = compiler.run().context("Compile run aborted")?;
    compiler
        .save()
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    println!(
        "Compiled {} report(s): {} IN column(s), {} EX column(s) -> {}",
        stats.reports,
        stats.inbound_columns,
        stats.outbound_columns,
        output.display()
    );
    Ok(())
}

fn inspect(report: &Path, as_json: bool) -> Result<()> {
    let analysis = analyze_report(report, &ExtractionLayout::default())
        .with_context(|| format!("Failed to inspect '{}'", report.display()))?;

    if as_json {
        let directions: Vec<_> = analysis
            .directions
            .iter()
            .map(|entry| {
                json!({
                    "direction": entry.direction,
                    "sheet": entry.sheet,
                    "summary": entry.summary,
                })
            })
            .collect();
        let doc = json!({
            "report": report.display().to_string(),
            "label": analysis.label,
            "directions": directions,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("Report: {}", report.display());
    println!("Label: {}", analysis.label);
    if analysis.directions.is_empty() {
        println!("No valve temperature sheets found");
    }

    for entry in &analysis.directions {
        println!();
        println!("  {} sheet: \"{}\"", entry.direction, entry.sheet);

        if entry.blocks.is_empty() {
            println!("    Blocks: none");
        }
        for (face, blocks) in entry.blocks.iter() {
            let rows: Vec<String> = blocks
                .iter()
                .map(|b| format!("{}-{}", b.start_row + 1, b.end_row + 1))
                .collect();
            println!("    {:<16} rows {}", face.label(), rows.join(", "));
        }

        let summary = &entry.summary;
        for group in FaceGroup::ALL {
            println!(
                "    {:<16} {}",
                format!("{}:", group.caption()),
                metric(summary.face_max(group))
            );
        }
        println!("    {:<16} {}", "Max:", metric(summary.combined_max));
        println!("    {:<16} {}", "Overall peak:", metric(summary.overall_max));
        println!(
            "    {:<16} {}",
            "Reference:",
            summary
                .reference
                .as_ref()
                .map_or_else(|| "-".to_string(), CellValue::to_string)
        );
    }

    Ok(())
}

fn metric(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn list_sheets(report: &Path) -> Result<()> {
    let reader = ReportReader::open(report)
        .with_context(|| format!("Failed to open '{}'", report.display()))?;
    let selection = select_sheets(reader.sheet_names());

    for (i, name) in reader.sheet_names().iter().enumerate() {
        let role = match Direction::classify(name) {
            Some(direction) if selection.get(direction) == Some(name.as_str()) => {
                direction.to_string()
            }
            Some(direction) => format!("{} (superseded)", direction),
            None => "-".to_string(),
        };
        println!("{}\t{}\t{}", i, name, role);
    }

    Ok(())
}
