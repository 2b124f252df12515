//! Tagsift main entry point
//!
//! Command-line interface around the hashtag scraping pipeline.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tagsift::config::{load_config_with_hash, Config};
use tagsift::output::{summarize, write_json};
use tagsift::scrape::{scrape_hashtag, HashtagScraper};
use tracing_subscriber::EnvFilter;

/// Tagsift: a resilient hashtag page scraper
///
/// Fetches public hashtag listing pages, extracts structured post records,
/// and writes the accumulated results to a JSON file.
#[derive(Parser, Debug)]
#[command(name = "tagsift")]
#[command(version = "0.3.0")]
#[command(about = "A resilient hashtag page scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Hashtag to scrape (a leading '#' is accepted)
    #[arg(value_name = "HASHTAG")]
    hashtag: String,

    /// Override the configured maximum number of pages
    #[arg(long)]
    max_pages: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the page URLs without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let max_pages = cli.max_pages.unwrap_or(config.scraper.max_pages);

    if cli.dry_run {
        handle_dry_run(&cli.hashtag, max_pages, &config)?;
        return Ok(());
    }

    let posts = scrape_hashtag(&cli.hashtag, max_pages, &config).await?;

    let results_path = PathBuf::from(&config.output.results_path);
    write_json(&posts, &results_path)
        .with_context(|| format!("failed to write results to {}", results_path.display()))?;

    println!("{}", summarize(&posts));
    println!("Results written to {}", results_path.display());

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tagsift=info,warn"),
            1 => EnvFilter::new("tagsift=debug,info"),
            2 => EnvFilter::new("tagsift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Shows what a run would fetch without performing any HTTP requests
fn handle_dry_run(hashtag: &str, max_pages: u32, config: &Config) -> anyhow::Result<()> {
    let scraper = HashtagScraper::new(hashtag, max_pages, config)?;

    println!("Dry run: no requests will be made");
    println!("Pages to fetch (up to {}):", max_pages);
    for page in 1..=max_pages {
        println!("  {}", scraper.build_page_url(page));
    }
    println!(
        "Fetch settings: timeout {}s, {} retries, backoff factor {}, pacing {}s",
        config.scraper.request_timeout,
        config.scraper.max_retries,
        config.scraper.backoff_factor,
        config.scraper.sleep_between_requests
    );

    Ok(())
}
