//! drive-stats - per-vehicle travel and parking time from a speed log
//!
//! Reads `timestamp, vehicle_id, speed` records, classifies the time between
//! samples as travel or parking for each vehicle, and writes one summary per
//! vehicle.
//!
//! Module structure:
//! - `domain/` - Core types (Sample, DayClock, DriveState)
//! - `io/` - Sample reader and report writer
//! - `services/` - Drive classifier and batch run
//! - `infra/` - Infrastructure (Config, RunStats)

use clap::Parser;
use drive_stats::infra::Config;
use drive_stats::services::run_batch;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// drive-stats - travel vs parking time per vehicle
#[derive(Parser, Debug)]
#[command(name = "drive-stats", version, about)]
struct Args {
    /// Sample log to read (`timestamp,vehicle_id,speed` per line)
    input: PathBuf,

    /// Report file to write
    output: PathBuf,

    /// Path to TOML configuration file (falls back to DRIVE_STATS_CONFIG, then defaults)
    #[arg(short, long)]
    config: Option<String>,
}

fn main() {
    // Initialize structured logging with configurable level via RUST_LOG env var
    // Default: INFO, use RUST_LOG=debug for per-sample transitions
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    let args = Args::parse();

    info!(version = env!("CARGO_PKG_VERSION"), git_hash = env!("GIT_HASH"), "drive_stats_starting");

    let config = Config::load(args.config.as_deref());
    info!(
        config_file = %config.config_file(),
        short_stop_threshold_secs = %config.short_stop_threshold_secs(),
        delimiter = ?config.delimiter(),
        reject_invalid_timestamps = %config.reject_invalid_timestamps(),
        output_format = %config.output_format().as_str(),
        "config_loaded"
    );

    let stats = run_batch(&args.input, &args.output, &config);
    stats.log();

    // Failures are reported in the log only; the exit status stays 0
    if stats.has_problems() {
        warn!("drive_stats_finished_with_problems");
    } else {
        info!("drive_stats_finished");
    }
}
