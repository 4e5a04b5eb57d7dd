//! Speaker-Harvest main entry point
//!
//! This is the command-line interface for the Speaker-Harvest scraper.

use chrono::Utc;
use clap::Parser;
use speaker_harvest::config::{default_config, load_config_with_hash, Config};
use speaker_harvest::crawler::harvest;
use speaker_harvest::output::{
    load_records, log_statistics, print_statistics, CsvOutputHandler, RecordSink,
    RecordStatistics, RunSummary,
};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Speaker-Harvest: a conference speaker directory scraper
///
/// Walks the paginated speaker listing, fetches every speaker's profile
/// page, and writes the results to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "speaker-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A conference speaker directory scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write the CSV here instead of the configured path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without any requests
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics for an existing CSV file and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

/// Exit status for a run stopped with Ctrl-C
const INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // The log file location comes from the config, so load it first
    let loaded = load(&cli);
    let log_path = loaded
        .as_ref()
        .ok()
        .and_then(|(config, _)| config.output.log_path.as_ref())
        .map(PathBuf::from);

    if let Err(e) = setup_logging(cli.verbose, cli.quiet, log_path.as_deref()) {
        eprintln!("Error: failed to open log file: {}", e);
        return ExitCode::FAILURE;
    }

    let config = match loaded {
        Ok((config, hash)) => {
            match (&cli.config, hash) {
                (Some(path), Some(hash)) => tracing::info!(
                    "Configuration loaded from {} (hash: {})",
                    path.display(),
                    hash
                ),
                _ => tracing::info!("No configuration file given; using built-in defaults"),
            }
            if let Some(path) = &log_path {
                tracing::info!("Logging to {}", path.display());
            }
            config
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = if cli.dry_run {
        handle_dry_run(&config)
    } else if cli.stats {
        handle_stats(&config)
    } else {
        tokio::select! {
            result = handle_harvest(config) => result,
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("Interrupted by user; no output written");
                eprintln!("\nInterrupted by user");
                return ExitCode::from(INTERRUPTED);
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Console output is always on. When `log_path` is set the same events are
/// appended to that file without ANSI colours.
fn setup_logging(verbose: u8, quiet: bool, log_path: Option<&Path>) -> std::io::Result<()> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("speaker_harvest=info,warn"),
            1 => EnvFilter::new("speaker_harvest=debug,info"),
            2 => EnvFilter::new("speaker_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let file_layer = match log_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false),
        )
        .with(file_layer)
        .init();

    Ok(())
}

/// Loads the configuration file (or defaults) and applies CLI overrides
///
/// Returns the config hash when a file was read.
fn load(cli: &Cli) -> Result<(Config, Option<String>), Box<dyn std::error::Error>> {
    let (mut config, hash) = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)?;
            (config, Some(hash))
        }
        None => (default_config()?, None),
    };

    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }

    Ok((config, hash))
}

/// Handles the --dry-run mode: validates config and shows what would be harvested
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Speaker-Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Listing: {}", config.site.listing_url);
    for (key, value) in &config.site.listing_params {
        println!("    {} = {}", key, value);
    }
    println!("  Detail: {}/<slug>", config.site.detail_url);
    for (key, value) in &config.site.detail_params {
        println!("    {} = {}", key, value);
    }

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Max attempts: {}", config.http.max_attempts);
    println!("  Backoff unit: {}ms", config.http.backoff_unit_ms);

    println!("\nCrawler:");
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    match config.crawler.max_pages {
        Some(max) => println!("  Max listing pages: {}", max),
        None => println!("  Max listing pages: unlimited"),
    }

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    match &config.output.log_path {
        Some(path) => println!("  Log file: {}", path),
        None => println!("  Log file: none (console only)"),
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the --stats mode: reports on an existing CSV file
fn handle_stats(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(&config.output.csv_path);
    println!("CSV: {}\n", path.display());

    let records = load_records(path)?;
    print_statistics(&RecordStatistics::from_records(&records));

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let started_at = Utc::now();
    let csv_path = PathBuf::from(&config.output.csv_path);

    tracing::info!("=== Starting speaker harvest ===");
    tracing::info!("Listing: {}", config.site.listing_url);

    let outcome = harvest(config).await?;

    if outcome.identifiers.is_empty() {
        tracing::error!("No speakers found; nothing to write");
        println!("No speakers found ({:?})", outcome.listing_stop);
        return Ok(());
    }

    if outcome.records.is_empty() {
        tracing::error!("Could not fetch details for any speaker; nothing to write");
        println!(
            "Found {} speakers but no profile could be fetched",
            outcome.identifiers.len()
        );
        return Ok(());
    }

    let mut sink = CsvOutputHandler::new(&csv_path);
    sink.write_records(&outcome.records)?;

    let summary = RunSummary {
        started_at,
        finished_at: Utc::now(),
        pages_visited: outcome.pages_visited,
        speakers_found: outcome.identifiers.len(),
        records_extracted: outcome.records.len(),
        output_path: Some(csv_path),
    };
    report(&summary);
    log_statistics(&RecordStatistics::from_records(&outcome.records));

    Ok(())
}

/// Logs and prints the end-of-run summary
fn report(summary: &RunSummary) {
    tracing::info!("=== Harvest complete ===");
    tracing::info!(
        "Listing pages: {}, speakers found: {}, extracted: {}, skipped: {} ({:.1}% success)",
        summary.pages_visited,
        summary.speakers_found,
        summary.records_extracted,
        summary.skipped(),
        summary.success_rate()
    );

    println!("\n✓ Harvest complete");
    println!("  Speakers processed: {}", summary.records_extracted);
    if summary.skipped() > 0 {
        println!("  Speakers skipped: {}", summary.skipped());
    }
    if let Some(path) = &summary.output_path {
        println!("  Saved to: {}", path.display());
    }
    println!("  Elapsed: {:.2}s", summary.duration_seconds());
}
