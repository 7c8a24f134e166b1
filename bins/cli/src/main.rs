//! Scostamenti command-line tool
//!
//! Runs the budget vs actual variance analysis over a directory of CSV
//! datasets and exports the resulting tables.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scostamenti_core::analysis::{AnalysisCache, AnalysisEngine, AnalysisReport};
use scostamenti_core::dataset::DatasetKind;
use scostamenti_io::{Exporter, dataset_path, find_missing_datasets, load_datasets};
use scostamenti_shared::types::round_half_even;
use scostamenti_shared::{AppConfig, AppError};

#[derive(Parser)]
#[command(
    name = "scostamenti",
    version,
    about = "Budget vs actual variance analysis",
    long_about = "Decomposes the gap between budget and actual revenue, material cost \
                  and resource cost into volume, mix and price effects."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the analysis and export every table
    Analyze {
        /// Directory holding the seven input datasets
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Directory the tables are written to
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Collapse shares below 1% into "Other"
        #[arg(long)]
        grouped: bool,
        /// Decimal places of exported figures
        #[arg(long)]
        decimal_places: Option<u32>,
    },

    /// List which input datasets are present
    Check {
        /// Directory holding the seven input datasets
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load()
        .map_err(|err| AppError::Validation(err.to_string()))
        .context("Failed to load configuration")?;
    init_tracing(&config.logging.filter);

    match cli.command {
        Commands::Analyze {
            input,
            output,
            grouped,
            decimal_places,
        } => {
            let input = input.unwrap_or_else(|| PathBuf::from(&config.data.input_dir));
            let output = output.unwrap_or_else(|| PathBuf::from(&config.data.output_dir));
            let decimal_places = decimal_places.unwrap_or(config.analysis.output_decimal_places);
            analyze(&config, &input, &output, grouped, decimal_places)
        }
        Commands::Check { input } => {
            let input = input.unwrap_or_else(|| PathBuf::from(&config.data.input_dir));
            check(&input)
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn analyze(config: &AppConfig, input: &Path, output: &Path, grouped: bool, decimal_places: u32) -> Result<()> {
    let datasets = load_datasets(input)
        .map_err(AppError::from)
        .with_context(|| format!("Failed to load datasets from {}", input.display()))?;

    let cache = AnalysisCache::from_config(AnalysisEngine::from_config(&config.analysis), &config.cache);
    let analysis = cache
        .run_cached(&datasets)
        .map_err(AppError::from)
        .context("Analysis failed")?;
    let report = analysis.report;

    let written = Exporter::new(output)
        .with_decimal_places(decimal_places)
        .with_grouped_shares(grouped)
        .export(&report)
        .map_err(AppError::from)
        .with_context(|| format!("Failed to export to {}", output.display()))?;
    info!(files = written.len(), cached = analysis.cached, "Analysis complete");

    print_summary(&report, decimal_places);
    for warning in &report.warnings {
        println!(
            "Warning: {} expected {} got {}",
            warning.check, warning.expected, warning.actual
        );
    }
    println!("Exported {} files to {}", written.len(), output.display());
    Ok(())
}

fn print_summary(report: &AnalysisReport, decimal_places: u32) {
    let cell = |value: Decimal| round_half_even(value, decimal_places).to_string();

    println!(
        "{:<16} {:>14} {:>14} {:>14} {:>14} {:>12} {:>12} {:>12}",
        "", "Budget", "Standard Mix", "Effective Mix", "Actual", "Volume", "Mix", "Price"
    );
    for summary in &report.summary.lines {
        let line = summary.line;
        println!(
            "{:<16} {:>14} {:>14} {:>14} {:>14} {:>12} {:>12} {:>12}",
            summary.row.label(),
            cell(line.budget),
            cell(line.standard_mix),
            cell(line.effective_mix),
            cell(line.actual),
            cell(line.volume_effect()),
            cell(line.mix_effect()),
            cell(line.price_effect()),
        );
    }
}

fn check(input: &Path) -> Result<()> {
    let missing = find_missing_datasets(input);
    for kind in DatasetKind::ALL {
        let status = if missing.contains(&kind) { "missing" } else { "ok" };
        println!("{:<8} {}", status, dataset_path(input, kind).display());
    }

    if missing.is_empty() {
        println!("All datasets present");
        return Ok(());
    }
    Err(AppError::from(scostamenti_io::IoError::MissingDatasets(missing)))
        .with_context(|| format!("Incomplete input in {}", input.display()))
}
