//! Fandex main entry point
//!
//! Command-line interface for the fandex wiki character harvester.

use clap::Parser;
use fandex::config::{load_config_with_hash, Config};
use fandex::crawl::run_crawl;
use fandex::output::print_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Fandex: a wiki character harvester
///
/// Crawls a Fandom-style wiki from the given seed URL, extracting character
/// records into a deduplicated JSON snapshot, and stops once the record
/// limit is reached.
#[derive(Parser, Debug)]
#[command(name = "fandex")]
#[command(version)]
#[command(about = "A wiki character harvester", long_about = None)]
struct Cli {
    /// Seed URL of the wiki to crawl (scheme optional)
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Stop after committing this many character records
    #[arg(short, long)]
    limit: Option<usize>,

    /// Path to a TOML configuration file with tuning options
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the seed and config and show what would run, without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, falling back to built-in defaults
    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (cfg, hash) = load_config_with_hash(path)?;
            (cfg, Some(hash))
        }
        None => (Config::default(), None),
    };

    // CLI limit overrides the config
    if let Some(limit) = cli.limit {
        config.crawler.record_limit = limit;
    }

    if cli.dry_run {
        handle_dry_run(&config, &cli.seed)?;
        return Ok(());
    }

    // Run the crawl
    match run_crawl(config, &cli.seed, config_hash).await {
        Ok(report) => {
            if !cli.quiet {
                println!();
                print_report(&report);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fandex=info,warn"),
            1 => EnvFilter::new("fandex=debug,info"),
            2 => EnvFilter::new("fandex=trace,debug"),
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

/// Handles the --dry-run mode: validates the seed and prints the effective
/// configuration
fn handle_dry_run(config: &Config, seed: &str) -> anyhow::Result<()> {
    use fandex::url::{normalize_seed, wiki_slug};

    println!("=== Fandex Dry Run ===\n");

    let seed_url = normalize_seed(seed, &config.wiki.allowed_domain)
        .map_err(|e| anyhow::anyhow!("Invalid seed URL {}: {}", seed, e))?;
    let slug = wiki_slug(&seed_url, &config.wiki.allowed_domain);

    println!("Seed URL: {}", seed_url);
    println!("Wiki:     {}", slug);
    println!(
        "Snapshot: {}/{}_characters.json",
        config.output.data_dir, slug
    );

    println!("\nCrawler:");
    println!("  Record limit:          {}", config.crawler.record_limit);
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!(
        "  Request timeout:        {}s",
        config.crawler.request_timeout_secs
    );

    println!("\nClassifier:");
    println!(
        "  Evidence threshold: {}",
        config.classifier.evidence_threshold
    );

    println!("\nImage cache:");
    println!("  Capacity: {}", config.image_cache.capacity);
    println!("  TTL:      {}s", config.image_cache.ttl_secs);

    println!("\nUser agent: {}", config.user_agent.header_value());

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} from {}", slug, seed_url);

    Ok(())
}
