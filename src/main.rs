//! price-watch - product price scraper CLI
//!
//! Extracts selling prices from product pages and walks option combinations
//! in round-robin batches.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use price_watch::commands::{InspectCommand, ScrapeCommand};
use price_watch::config::{Config, OutputFormat};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{warn, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "price-watch",
    version,
    about = "Product price scraper with round-robin option coverage",
    long_about = "Extracts the trustworthy selling price from product pages, detects sold-out and \
                  bot-block states, and visits option combinations in resumable batches."
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "SCRAPER_PROXY")]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape product pages
    #[command(alias = "s")]
    Scrape {
        /// Product page URL(s)
        #[arg(required = true)]
        urls: Vec<String>,

        /// Round-robin cursor to resume from
        #[arg(long, default_value = "0")]
        cursor: usize,

        /// Option combinations visited per page
        #[arg(short, long)]
        batch: Option<usize>,

        /// Pages visited at once
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Analyze a saved HTML page offline
    #[command(alias = "i")]
    Inspect {
        /// HTML file to analyze
        file: PathBuf,

        /// Round-robin cursor to plan from
        #[arg(long, default_value = "0")]
        cursor: usize,

        /// Option combinations per run
        #[arg(short, long)]
        batch: Option<usize>,
    },

    /// Print the effective site adapter as TOML
    Adapter,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;

    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Scrape { urls, cursor, batch, concurrency } => {
            if let Some(batch) = batch {
                config.variants_per_run = batch;
            }
            if let Some(concurrency) = concurrency {
                config.concurrency = concurrency;
            }

            let cancel = CancellationToken::new();
            let stopper = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted, finishing in-flight variants");
                    stopper.cancel();
                }
            });

            let cmd = ScrapeCommand::new(config);
            let output = cmd.execute(&urls, cursor, &cancel).await?;
            println!("{}", output);
        }

        Commands::Inspect { file, cursor, batch } => {
            if let Some(batch) = batch {
                config.variants_per_run = batch;
            }

            let cmd = InspectCommand::new(config);
            let output = cmd.execute(&file, cursor)?;
            println!("{}", output);
        }

        Commands::Adapter => {
            config.adapter.compile().context("Invalid site adapter")?;
            let output =
                toml::to_string_pretty(&config.adapter).context("Failed to serialize adapter")?;
            print!("{}", output);
        }
    }

    Ok(())
}
