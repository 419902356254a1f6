//! Catalogue Crawler main entry point
//!
//! This is the command-line interface for the book catalogue crawler.

use catalogue_crawler::config::{load_config_with_hash, Config};
use catalogue_crawler::crawler::{run_crawl, CrawlOutcome};
use catalogue_crawler::output::{export_records, print_statistics, BookTable, CrawlStatistics};
use catalogue_crawler::session::{run_menu, FilterSession};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalogue Crawler: a paginated book catalogue scraper
///
/// Walks every listing page of the catalogue, extracts title, genre, price,
/// rating and availability from each book's page, then opens an interactive
/// filter menu over the results.
#[derive(Parser, Debug)]
#[command(name = "catalogue-crawler")]
#[command(version)]
#[command(about = "A paginated book catalogue scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Catalogue root URL, overriding the configuration
    #[arg(long, value_name = "URL")]
    root_url: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with_all = ["export", "no_menu"])]
    dry_run: bool,

    /// Write every record to this file after crawling instead of opening the menu
    #[arg(long, value_name = "PATH")]
    export: Option<String>,

    /// Crawl and print statistics without opening the menu
    #[arg(long)]
    no_menu: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_crawl(config, &cli).await?;
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
            0 => EnvFilter::new("catalogue_crawler=info,warn"),
            1 => EnvFilter::new("catalogue_crawler=debug,info"),
            2 => EnvFilter::new("catalogue_crawler=trace,debug"),
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

/// Loads the configuration file if given, then applies CLI overrides
fn load_effective_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    if let Some(root_url) = &cli.root_url {
        config.catalogue.root_url = root_url.clone();
        catalogue_crawler::config::validate(&config)?;
    }

    Ok(config)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Catalogue Crawler Dry Run ===\n");

    println!("Catalogue:");
    println!("  Root: {}", config.catalogue.root()?);
    println!("  First page: {}", config.catalogue.first_page_url()?);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);

    println!("\nOutput:");
    println!("  Default export: {}", config.output.export_path);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation and whatever follows it
async fn handle_crawl(config: Config, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    println!("Crawling {} ...", config.catalogue.root()?);
    println!("This visits every book page one at a time and may take a few minutes.");

    let report = match run_crawl(&config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let stats = CrawlStatistics::from_report(&report);
    println!();
    print_statistics(&stats);
    println!();

    if let CrawlOutcome::Aborted { page, url, reason } = &report.outcome {
        println!(
            "Crawl stopped early at page {} ({}): {}. Results cover earlier pages only.",
            page, url, reason
        );
    }

    if report.records().is_empty() {
        println!("No book data could be extracted. Exiting.");
        return Ok(());
    }

    println!("Crawl complete: {} books in the table.", report.records().len());

    if let Some(requested) = &cli.export {
        let path = export_records(report.records(), requested)?;
        println!("Exported {} books to '{}'.", report.records().len(), path.display());
        return Ok(());
    }

    if cli.no_menu {
        return Ok(());
    }

    let mut session = FilterSession::new(BookTable::new(report.into_records()));
    run_menu(&mut session, &config.output.export_path)?;

    Ok(())
}
