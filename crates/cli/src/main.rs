//! Pet telemetry batch processor CLI
//!
//! Thin orchestration around the batch engine: reads a JSON Lines batch
//! of raw telemetry records, runs the pipeline, and writes the three
//! output datasets to a directory. Everything with decision logic lives
//! in `pettrack-processor`; this binary only wires source and sink.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use pettrack_processor::{
    BatchOutput, BatchPipeline, CoercionPolicy, JsonLinesSink, PipelineConfig,
};
use pettrack_types::RawTelemetryRecord;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "pettrack",
    version,
    about = "Pet telemetry batch processor",
    long_about = "Processes one bounded batch of pet telemetry records into three \
                  datasets: high-severity health alerts, per-pet behavioral \
                  aggregates, and anomalous readings."
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one batch of telemetry records
    #[command(name = "run", about = "Run the pipeline over an input batch")]
    Run {
        /// Input batch, one JSON record per line
        #[arg(long, env = "PETTRACK_INPUT", value_name = "FILE")]
        input: PathBuf,

        /// Directory the three output datasets are written to
        #[arg(
            long,
            env = "PETTRACK_OUTPUT_DIR",
            value_name = "DIR",
            default_value = "output"
        )]
        output_dir: PathBuf,

        /// Abort the batch on the first malformed pet id instead of
        /// skipping the record
        #[arg(long)]
        strict_coercion: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            input,
            output_dir,
            strict_coercion,
        } => run_batch(&input, &output_dir, strict_coercion),
    }
}

fn run_batch(input: &Path, output_dir: &Path, strict_coercion: bool) -> anyhow::Result<()> {
    let records = read_batch(input)?;

    let config = PipelineConfig {
        coercion_policy: if strict_coercion {
            CoercionPolicy::Fail
        } else {
            CoercionPolicy::Skip
        },
    };
    let pipeline = BatchPipeline::with_config(config);
    let mut sink = JsonLinesSink::new(output_dir);

    let output = pipeline
        .run_and_emit(&records, &mut sink)
        .context("batch run failed")?;

    print_summary(&output, output_dir);
    Ok(())
}

/// Read a JSON Lines batch, one raw record per non-empty line
fn read_batch(path: &Path) -> anyhow::Result<Vec<RawTelemetryRecord>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open input batch {}", path.display()))?;

    let mut records = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: RawTelemetryRecord = serde_json::from_str(&line)
            .with_context(|| format!("invalid record on line {}", line_no + 1))?;
        records.push(record);
    }
    Ok(records)
}

fn print_summary(output: &BatchOutput, output_dir: &Path) {
    let stats = &output.stats;

    println!("{}", "Batch complete".bold().cyan());
    println!("  Records in:  {}", stats.records_in);
    println!("  Normalized:  {}", stats.records_normalized);
    if stats.records_skipped > 0 {
        println!(
            "  Skipped:     {}",
            stats.records_skipped.to_string().yellow()
        );
    }
    println!("  Alerts:      {}", stats.alert_count.to_string().red());
    println!("  Anomalies:   {}", stats.anomaly_count.to_string().yellow());
    println!("  Pets seen:   {}", stats.pets_seen);
    println!(
        "  Duration:    {}ms",
        stats.duration().num_milliseconds()
    );
    println!();
    println!("Outputs written to {}", output_dir.display().to_string().green());
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
