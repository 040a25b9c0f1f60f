//! consoleview CLI - summarize recorded task runtime snapshots.

#![allow(clippy::needless_pass_by_value, clippy::missing_errors_doc)]

mod table;

use clap::{Parser, Subcommand, ValueEnum};
use consoleview_core::{ConfigError, SortColumn, ViewConfig};
use consoleview_stats::{sort_records, Snapshot, StatsError};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "consoleview=info";

#[derive(Parser)]
#[command(name = "consoleview")]
#[command(about = "Summarize async task runtime snapshots")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a table of per-task time and waker metrics
    Summary {
        /// Snapshot JSON file ("-" reads stdin)
        snapshot: PathBuf,

        /// Config file (default: XDG config location)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Decimals on the leading duration unit
        #[arg(short, long)]
        precision: Option<usize>,

        /// Column to sort by (id, polls, total, busy, scheduled, idle)
        #[arg(short, long)]
        sort: Option<SortColumn>,

        /// Sort ascending, overriding the configured order
        #[arg(long)]
        ascending: bool,

        /// Sort descending, overriding the configured order
        #[arg(long, conflicts_with = "ascending")]
        descending: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Config file (default: XDG config location)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Errors reported by the CLI.
#[derive(Debug, Error)]
enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Stats(#[from] StatsError),
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    match run(cli.command, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Commands::Summary {
            snapshot,
            config,
            precision,
            sort,
            ascending,
            descending,
            format,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(precision) = precision {
                config = config.with_precision(precision)?;
            }
            if let Some(sort) = sort {
                config.sort_by = sort;
            }
            if ascending || descending {
                config.descending = descending;
            }
            summarize(&snapshot, &config, format, out)
        }
        Commands::Config { config } => {
            let config = load_config(config.as_deref())?;
            write!(out, "{}", config.to_toml())?;
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ViewConfig, CliError> {
    match path {
        Some(path) => Ok(ViewConfig::load_from_file(path)?),
        None => Ok(ViewConfig::load()),
    }
}

fn read_snapshot(path: &Path) -> Result<Snapshot, CliError> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&content)?)
}

fn summarize(
    path: &Path,
    config: &ViewConfig,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let snapshot = read_snapshot(path)?;
    let mut records = snapshot.records()?;
    tracing::info!(
        path = %path.display(),
        tasks = snapshot.tasks.len(),
        derived = records.len(),
        "loaded snapshot"
    );
    sort_records(&mut records, config.sort_by, config.descending);

    match format {
        OutputFormat::Text => {
            write!(out, "{}", table::render_table(&records, config.duration_precision))?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
