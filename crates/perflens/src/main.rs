use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use itertools::Itertools;
use mimalloc::MiMalloc;
use perflens_predict::AcceleratorThresholds;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Derive secondary performance classifications from benchmark measurement
/// logs: execution regimes, cache fit, accelerator feasibility, and
/// recomputation overhead.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the predictive models over a benchmark log
    ///
    /// Reads the log, normalizes missing columns to the NA placeholder,
    /// applies the cost, cache, accelerator, and locality models to each
    /// row independently, and writes one prediction row per input row.
    Predict {
        /// Benchmark log to analyze
        #[arg(short, long, default_value = "results/csv/benchmark_log.csv")]
        input: PathBuf,

        /// Where to write the predictions table
        #[arg(short, long, default_value = "results/csv/predictions.csv")]
        output: PathBuf,

        /// Smallest granularity unit classified as fully amortizing
        /// accelerator dispatch overhead
        #[arg(long, default_value_t = perflens_predict::FEASIBLE_GRANULARITY_MIN)]
        feasible_min: f64,

        /// Granularity at or below which dispatch overhead dominates
        #[arg(long, default_value_t = perflens_predict::MARGINAL_GRANULARITY_MIN)]
        marginal_min: f64,
    },

    /// Label each run of a benchmark log with its dominant regime
    ///
    /// Writes the input table back with one appended observed_regime
    /// column; all other columns pass through untouched.
    Regimes {
        /// Benchmark log to label
        #[arg(short, long, default_value = "results/csv/extreme_log.csv")]
        input: PathBuf,

        /// Where to write the labeled table
        #[arg(short, long, default_value = "results/csv/regime_mapping.csv")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize structured logging. Output goes to stderr so nothing
    // interferes with the CSV artifacts. Default to warn, allowlist our
    // crates.
    const CRATES: &[&str] = &[
        "perflens",
        "perflens_predict",
        "perflens_regime",
        "perflens_schemas",
    ];
    let level = cli.verbose.tracing_level_filter();
    let allowlist = CRATES.iter().map(|c| format!("{c}={level}")).join(",");
    let filter = EnvFilter::new(format!("warn,{allowlist}"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
        .init();

    match cli.command {
        Commands::Predict {
            input,
            output,
            feasible_min,
            marginal_min,
        } => {
            let thresholds = AcceleratorThresholds {
                feasible_min,
                marginal_min,
            };
            let reader = open_input(&input)?;
            let writer = create_output(&output)?;
            perflens_predict::run(reader, writer, &thresholds).with_context(
                || format!("predictive analysis of {} failed", input.display()),
            )?;
            info!("analytical predictions saved to {}", output.display());
        }
        Commands::Regimes { input, output } => {
            let reader = open_input(&input)?;
            let writer = create_output(&output)?;
            perflens_regime::run(reader, writer).with_context(|| {
                format!("regime mapping of {} failed", input.display())
            })?;
            info!("regime mapping saved to {}", output.display());
        }
    }
    Ok(())
}

/// Opens the source log for reading. A missing input file is the one
/// user-visible fatal condition in either pipeline.
fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| {
        format!("cannot read benchmark log {}", path.display())
    })?;
    Ok(BufReader::new(file))
}

/// Creates the output file, making parent directories as needed.
fn create_output(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("cannot create output directory {}", parent.display())
            })?;
        }
    }
    let file = File::create(path).with_context(|| {
        format!("cannot create output file {}", path.display())
    })?;
    Ok(BufWriter::new(file))
}
