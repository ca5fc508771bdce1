//! # pct CLI entry point
//!
//! Parses command-line arguments, loads and classifies the trigger dataset
//! once, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pct_cli::classify::{run_classify, ClassifyArgs};
use pct_cli::export::{run_export, ExportArgs};
use pct_cli::facets::{run_facets, FacetsArgs};
use pct_cli::list::{run_list, ListArgs};
use pct_cli::{GlobalOptions, Session};
use pct_core::EvaluationDate;

/// Packaging Compliance Tool
///
/// Classifies packaging-regulation triggers by deadline (in force, due
/// within a year, due later) and filters, lists, and exports the trigger
/// table.
#[derive(Parser, Debug)]
#[command(name = "pct", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Trigger dataset (xlsx, xlsm, xls, ods, or csv). Overrides the config.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, global = true, value_name = "DATE")]
    as_of: Option<EvaluationDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the deadline category of every trigger.
    Classify(ClassifyArgs),

    /// List triggers matching the filters.
    List(ListArgs),

    /// Export triggers matching the filters to CSV.
    Export(ExportArgs),

    /// Show the available filter options.
    Facets(FacetsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "pct starting");

    let options = GlobalOptions {
        config: cli.config,
        data: cli.data,
        as_of: cli.as_of,
    };

    let result = Session::open(&options).and_then(|session| match &cli.command {
        Commands::Classify(args) => run_classify(args, &session),
        Commands::List(args) => run_list(args, &session),
        Commands::Export(args) => run_export(args, &session),
        Commands::Facets(args) => run_facets(args, &session),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
