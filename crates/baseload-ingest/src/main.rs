//! Baseload - customer base loader

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use baseload_common::logging::{init_logging, LogConfig, LogLevel};
use baseload_ingest::{config::Config, ingest, normalize, source, store};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "baseload")]
#[command(author, version, about = "Customer base loader and document validator")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// Ingest a base file, then normalize the stored records
    Run {
        /// Input base file
        #[arg(short, long, default_value = baseload_ingest::config::DEFAULT_INPUT_FILE)]
        input: PathBuf,
    },

    /// Ingest a base file without normalizing
    Ingest {
        /// Input base file
        #[arg(short, long, default_value = baseload_ingest::config::DEFAULT_INPUT_FILE)]
        input: PathBuf,
    },

    /// Normalize the records already stored
    Normalize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env()?;
    if cli.verbose {
        log_config.level = LogLevel::Debug;
    }

    init_logging(&log_config)?;

    let config = Config::load()?;
    let pool = store::connect(&config.database).await?;
    let client_store = store::PgClientStore::new(pool.clone());

    match cli.command {
        Command::Run { input } => {
            let total_start = Instant::now();

            let read_start = Instant::now();
            let lines = source::read_lines(&input).await?;
            let read_elapsed = read_start.elapsed();

            let ingest_start = Instant::now();
            let ingested =
                ingest::ingest_lines(&client_store, &lines, config.pipeline.bulk_size).await?;
            let ingest_elapsed = ingest_start.elapsed();

            let normalize_start = Instant::now();
            let normalized =
                normalize::normalize_clients(&client_store, config.pipeline.page_size).await?;
            let normalize_elapsed = normalize_start.elapsed();

            info!(
                total = ?total_start.elapsed(),
                read = ?read_elapsed,
                ingest = ?ingest_elapsed,
                normalize = ?normalize_elapsed,
                records = ingested.records,
                normalized = normalized.records,
                "run complete"
            );
        },
        Command::Ingest { input } => {
            let lines = source::read_lines(&input).await?;
            ingest::ingest_lines(&client_store, &lines, config.pipeline.bulk_size).await?;
        },
        Command::Normalize => {
            normalize::normalize_clients(&client_store, config.pipeline.page_size).await?;
        },
    }

    pool.close().await;
    Ok(())
}
