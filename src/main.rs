//! Wiki-Ripple main entry point
//!
//! This is the command-line interface for the Wiki-Ripple link mapper.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use wiki_ripple::config::{load_config_with_hash, validate, Config, TraversalStrategy};
use wiki_ripple::crawler::CrawlEngine;
use wiki_ripple::output::{load_statistics, print_statistics, print_summary};
use wiki_ripple::storage::open_storage;

/// Wiki-Ripple: a depth-bounded link mapper for a single site
///
/// Wiki-Ripple crawls a site from a seed page, following links whose path
/// starts with a prefix (by default `/wiki/`), and saves every discovered
/// URL to a deduplicated SQLite table.
#[derive(Parser, Debug)]
#[command(name = "wiki-ripple")]
#[command(version)]
#[command(about = "A depth-bounded link mapper for a single site", long_about = None)]
struct Cli {
    /// Absolute http(s) URL of the first page
    #[arg(value_name = "SEED_URL", required_unless_present = "stats")]
    seed: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum link depth; the seed is depth 1
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// SQLite database file
    #[arg(long, value_name = "PATH")]
    database: Option<String>,

    /// Only follow links whose path starts with this prefix
    #[arg(long, value_name = "P")]
    path_prefix: Option<String>,

    /// Visit pages level by level instead of depth-first
    #[arg(long)]
    breadth_first: bool,

    /// Number of pages fetched at once
    #[arg(long, value_name = "N")]
    concurrency: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show statistics from the database and exit
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;

    if cli.stats {
        handle_stats(&config)?;
    } else if let Some(seed) = cli.seed.as_deref() {
        handle_crawl(&config, seed).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wiki_ripple=info,warn"),
            1 => EnvFilter::new("wiki_ripple=debug,info"),
            2 => EnvFilter::new("wiki_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any), applies CLI overrides, and validates the result
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(database) = &cli.database {
        config.output.database_path = database.clone();
    }
    if let Some(prefix) = &cli.path_prefix {
        config.crawler.path_prefix = prefix.clone();
    }
    if cli.breadth_first {
        config.crawler.strategy = TraversalStrategy::BreadthFirst;
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_fetches = concurrency;
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let store = open_storage(
        Path::new(&config.output.database_path),
        config.output.count_policy,
    )
    .context("Failed to open database")?;

    let stats = load_statistics(&store)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, seed: &str) -> anyhow::Result<()> {
    let store = open_storage(
        Path::new(&config.output.database_path),
        config.output.count_policy,
    )
    .with_context(|| format!("Failed to open database {}", config.output.database_path))?;
    tracing::info!("Saving links to {}", config.output.database_path);

    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping crawl");
            signal_token.cancel();
        }
    });

    let mut engine = CrawlEngine::from_config(config, store)?.with_cancellation(token);
    let summary = engine.run(seed).await?;

    print_summary(&summary);
    Ok(())
}
