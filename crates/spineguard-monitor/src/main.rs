//! SpineGuard CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use spineguard_monitor::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            spineguard_monitor::cli::run(args).await?;
        }
        Commands::Calibrate(args) => {
            spineguard_monitor::cli::run_calibrate(args).await?;
        }
        Commands::Version => {
            println!("spineguard {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
