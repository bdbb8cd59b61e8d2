//! shiftsheet CLI - Shift-Schedule Extraction Engine
//!
//! Command-line interface for inspecting roster workbooks and producing
//! merge plans from them.

mod output;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shiftsheet_core::{ColorLegend, ScheduleMonth};
use shiftsheet_extract::{extract, plan_commit, Extraction};
use shiftsheet_io::{load_config, load_legend, load_workbook_grid};

use output::{write_report, ExitCode};

#[derive(Parser)]
#[command(name = "shiftsheet")]
#[command(author, version, about = "Shift-schedule extraction engine", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ExtractArgs {
    /// Roster workbook (.xlsx)
    #[arg(value_name = "WORKBOOK")]
    workbook: PathBuf,

    /// Extraction config (JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Color legend (JSON); omit to run without color mappings
    #[arg(short, long)]
    legend: Option<PathBuf>,

    /// Worksheet name (first sheet if not specified)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Schedule year
    #[arg(short, long)]
    year: i32,

    /// Schedule month (1-12)
    #[arg(short, long)]
    month: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a workbook and print the validation report
    Inspect {
        #[command(flatten)]
        args: ExtractArgs,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Include raw grid samples in text output
        #[arg(long)]
        samples: bool,
    },

    /// Extract a workbook and print the resulting merge plan as JSON
    Plan {
        #[command(flatten)]
        args: ExtractArgs,
    },
}

fn run_extraction(args: &ExtractArgs) -> Result<(Extraction, shiftsheet_core::Role)> {
    let grid = load_workbook_grid(&args.workbook, args.sheet.as_deref())
        .with_context(|| format!("failed to load {}", args.workbook.display()))?;
    let config = load_config(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    let legend = match &args.legend {
        Some(path) => load_legend(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ColorLegend::default(),
    };
    let month = ScheduleMonth::new(args.year, args.month)?;

    Ok((extract(&grid, &config, &legend, month), config.role))
}

fn run(cli: &Cli) -> Result<ExitCode> {
    match &cli.command {
        Commands::Inspect {
            args,
            format,
            samples,
        } => {
            let (extraction, _) = run_extraction(args)?;
            match format.as_str() {
                "json" => {
                    println!("{}", serde_json::to_string_pretty(&extraction.report)?);
                }
                _ => {
                    let stdout = io::stdout();
                    write_report(&mut stdout.lock(), &extraction.report, *samples)?;
                }
            }
            Ok(ExitCode::from_error_count(extraction.report.errors.len()))
        }
        Commands::Plan { args } => {
            let (extraction, role) = run_extraction(args)?;
            match plan_commit(&extraction, role) {
                Ok(plan) => {
                    println!("{}", serde_json::to_string_pretty(&plan)?);
                    Ok(ExitCode::Success)
                }
                Err(err) => {
                    let stderr = io::stderr();
                    let mut handle = stderr.lock();
                    write_report(&mut handle, &extraction.report, false)?;
                    writeln!(handle, "error: {err}")?;
                    Ok(ExitCode::Failure)
                }
            }
        }
    }
}

fn main() -> process::ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code.into(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::Failure.into()
        }
    }
}
