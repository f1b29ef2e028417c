//! Command-line surface for the `spineguard` binary.
//!
//! # Usage
//!
//! ```bash
//! # Monitor a live stream piped from the sensor driver
//! driver | spineguard run --model model.json
//!
//! # Replay a capture file
//! spineguard run --model model.json --input capture.csv
//!
//! # Record labeled samples for the offline trainer
//! driver | spineguard calibrate --label good --samples 200
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use spineguard_core::{MonitorResult, PostureLabel, SourceError};
use spineguard_model::CentroidClassifier;
use spineguard_pipeline::PipelineConfig;

use crate::calibrate;
use crate::notify::LogNotifier;
use crate::session::{MonitorSession, SessionConfig};
use crate::source::SampleSource;

/// SpineGuard command line interface.
#[derive(Parser, Debug)]
#[command(name = "spineguard")]
#[command(author, version, about = "Posture monitoring over a 6-axis IMU stream")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run live posture monitoring
    Run(RunArgs),

    /// Capture labeled calibration samples for the offline trainer
    Calibrate(CalibrateArgs),

    /// Display version information
    Version,
}

/// Arguments for `spineguard run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the trained classifier artifact (JSON)
    #[arg(long, default_value = "model.json")]
    pub model: PathBuf,

    /// Capture file to replay; reads stdin when omitted
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Snapshot log path (recreated at start)
    #[arg(long, default_value = "posture_log.csv")]
    pub log: PathBuf,

    /// Seconds between snapshot log rows
    #[arg(long, default_value = "10")]
    pub log_interval_secs: u64,
}

/// Arguments for `spineguard calibrate`.
#[derive(Args, Debug)]
pub struct CalibrateArgs {
    /// Posture label for the captured samples
    #[arg(long, value_parser = parse_label)]
    pub label: PostureLabel,

    /// Number of samples to capture
    #[arg(long, default_value = "100")]
    pub samples: usize,

    /// Output CSV path
    #[arg(long, default_value = "calibration.csv")]
    pub output: PathBuf,

    /// Capture file to replay; reads stdin when omitted
    #[arg(long)]
    pub input: Option<PathBuf>,
}

fn parse_label(text: &str) -> Result<PostureLabel, String> {
    PostureLabel::parse(text).ok_or_else(|| format!("unknown label '{text}' (expected good or bad)"))
}

/// Execute `spineguard run`: load the model, start a session, and wait
/// for the stream to end or ctrl-c.
///
/// # Errors
///
/// Fatal start errors (bad artifact, unopenable source or log) and any
/// terminal session error.
pub async fn run(args: RunArgs) -> MonitorResult<()> {
    let classifier = CentroidClassifier::load(&args.model)?;
    let source = open_source(args.input.as_deref()).await?;

    let config = SessionConfig {
        pipeline: PipelineConfig::default(),
        log_path: args.log,
        log_interval: Duration::from_secs(args.log_interval_secs),
    };
    let handle = MonitorSession::start(
        config,
        Box::new(classifier),
        Box::new(LogNotifier::new()),
        source,
    )?;

    info!("monitoring; press ctrl-c to stop");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("ctrl-c received, stopping");
            handle.stop();
        }
        () = handle.stopped() => {}
    }
    handle.join().await
}

/// Execute `spineguard calibrate`.
///
/// # Errors
///
/// Source open/read failures and capture write failures.
pub async fn run_calibrate(args: CalibrateArgs) -> MonitorResult<()> {
    let mut source = open_source(args.input.as_deref()).await?;
    let written = calibrate::capture(&mut source, args.label, args.samples, &args.output).await?;
    if written < args.samples {
        info!(
            written,
            wanted = args.samples,
            "stream ended before the requested sample count"
        );
    }
    Ok(())
}

async fn open_source(path: Option<&Path>) -> Result<SampleSource, SourceError> {
    match path {
        Some(path) => SampleSource::open_file(path).await,
        None => Ok(SampleSource::stdin()),
    }
}
