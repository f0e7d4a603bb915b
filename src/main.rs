//! Endpoint prober (v1)
//!
//! Verifies a list of candidate endpoints and keeps the live ones, fastest first.
//!
//! # Architecture Overview
//!
//! ```text
//!   API.txt ──▶ ┌──────────┐    ┌──────────────────────────────┐    ┌────────┐    ┌───────────┐
//!               │ loader   │───▶│ scheduler                    │───▶│ ranker │───▶│ persister │──▶ API.txt
//!  (prior) ───▶ │ (dedup)  │    │  task per endpoint           │    └────────┘    └─────┬─────┘
//!               └──────────┘    │   retry_probe ─▶ probe (HTTP)│                        │
//!                               └──────────────────────────────┘                        ▼
//!                                                                             success_result.txt
//! ```
//!
//! Individual endpoint failures never change the exit status. Only
//! configuration and file I/O errors are fatal.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;

use endpoint_prober::config::{read_config, validate_config, ConfigError, ProberConfig};
use endpoint_prober::lifecycle::{spawn_interrupt_listener, Shutdown};
use endpoint_prober::observability::{logging, metrics};
use endpoint_prober::Runner;

#[derive(Parser)]
#[command(name = "endpoint-prober", version)]
#[command(about = "Probe candidate endpoints and rank the live ones by latency", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Candidate endpoint file (overrides files.input_path)
    #[arg(short, long)]
    input: Option<String>,

    /// Ranked output file (overrides files.output_path)
    #[arg(short, long)]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => ProberConfig::default(),
    };
    if let Some(input) = cli.input {
        config.files.input_path = input;
    }
    if let Some(output) = cli.output {
        config.files.output_path = output;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability);

    tracing::info!(
        input = %config.files.input_path,
        output = %config.files.output_path,
        mode = ?config.persist.mode,
        collection = ?config.scheduler.collection,
        probe_path = ?config.probe.path,
        data_check = ?config.probe.data_check,
        "endpoint-prober v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let metrics_handle = match &config.observability.metrics_path {
        Some(_) => Some(metrics::install_recorder()?),
        None => None,
    };
    let metrics_path = config.observability.metrics_path.clone();

    let shutdown = Arc::new(Shutdown::new());
    let interrupt = spawn_interrupt_listener(Arc::clone(&shutdown));

    let runner = Runner::new(config);
    let result = runner.run(shutdown.subscribe()).await;
    interrupt.abort();
    let report = result?;

    if let (Some(handle), Some(path)) = (&metrics_handle, &metrics_path) {
        metrics::write_snapshot(handle, Path::new(path)).await?;
    }

    tracing::info!(
        run_id = %report.run_id,
        survivors = report.survivors,
        failed = report.failed,
        "Finished"
    );
    println!("All done.");
    Ok(())
}
