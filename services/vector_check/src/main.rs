//! vector_check entry point

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use engine::VectorSet;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vector_check::{replay, VectorCheckConfig};

#[derive(Parser, Debug)]
#[command(name = "vector_check", version, about = "Epoch aggregation vector checker")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate the vector messages in process and compare
    Verify {
        /// Vector file (overrides the configured one)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Send the vector messages through a loopback transport, then aggregate
    Replay {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Print the library version
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = VectorCheckConfig::load(cli.config.as_deref())?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Verify { file } => {
            let set = load_set(file, &config)?;
            let results = set.verify().map_err(|e| {
                error!(error = %e, "verification failed");
                e
            })?;
            info!(epochs = results.len(), "vectors verified");
            for result in &results {
                println!("{} {} {}", result.epoch, result.state, result.hash);
            }
        }
        Commands::Replay { file } => {
            let set = load_set(file, &config)?;
            let outcome = replay(&set, &config).context("Replay failed")?;
            set.compare(&outcome.results).map_err(|e| {
                error!(error = %e, "replayed results differ");
                e
            })?;
            info!(
                epochs = outcome.results.len(),
                drains = outcome.drains,
                "replay verified"
            );
            println!(
                "sent={} received={} back_pressure={} dropped={}",
                outcome.stats.sent,
                outcome.stats.received,
                outcome.stats.back_pressure,
                outcome.stats.dropped_frames
            );
        }
        Commands::Version => println!("{}", types::version()),
    }

    Ok(())
}

fn load_set(file: Option<PathBuf>, config: &VectorCheckConfig) -> Result<VectorSet> {
    let path = file.unwrap_or_else(|| config.vector_file.clone());
    VectorSet::load(&path).with_context(|| format!("Failed to load {}", path.display()))
}
