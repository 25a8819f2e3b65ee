//! Blotter Demo CLI
//!
//! Entry point for the synthetic trade blotter demo.
//!
//! # Commands
//!
//! - `blotter-demo run [--duration-secs N]` - live blotter until N seconds or Ctrl-C
//! - `blotter-demo snapshot [--count N] [--pretty]` - trades as JSON
//! - `blotter-demo tickers` - available instruments and prices
//! - `blotter-demo bump [--ticker T] [--force]` - one ad hoc price move

use anyhow::{Context, Result};
use blotter::commands;
use blotter::prelude::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Synthetic trade blotter demo
#[derive(Parser)]
#[command(name = "blotter-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the live blotter
    Run {
        /// Stop after this many seconds (default: until Ctrl-C)
        #[arg(short, long)]
        duration_secs: Option<u64>,
    },

    /// Generate a batch of trades and print them as JSON
    Snapshot {
        /// Number of trades
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// List the available tickers with their current prices
    Tickers,

    /// Apply one market price move
    Bump {
        /// Instrument to move (default: a random one)
        #[arg(short, long)]
        ticker: Option<String>,

        /// Apply the configured significant move
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = DemoConfig::resolve(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let default_level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level.to_lowercase()))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run { duration_secs } => {
            let summary =
                commands::run::run(&config, duration_secs.map(Duration::from_secs)).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Snapshot { count, pretty } => {
            println!("{}", commands::snapshot::run(&config, count, pretty)?);
        }
        Commands::Tickers => {
            print!("{}", commands::tickers::run(&config)?);
        }
        Commands::Bump { ticker, force } => {
            println!("{}", commands::bump::run(&config, ticker.as_deref(), force)?);
        }
    }

    Ok(())
}
