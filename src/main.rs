//! Timetable scraper entry point
//!
//! This is the command-line interface for the course timetable scraper.

use clap::Parser;
use std::path::PathBuf;
use timetable_scraper::config::{load_config_with_hash, validate};
use timetable_scraper::crawler::{Coordinator, RunOptions};
use timetable_scraper::output::print_summary;
use timetable_scraper::Config;
use tracing_subscriber::EnvFilter;

/// Timetable scraper: course schedules to CSV
///
/// Fetches the timetable page of every course code in the input list with a
/// pool of parallel workers and writes courses, sections and activities to
/// CSV files. Courses that could not be scraped are listed in the skip file.
#[derive(Parser, Debug)]
#[command(name = "timetable-scraper")]
#[command(version)]
#[command(about = "Generate a course list.", long_about = None)]
struct Cli {
    /// Run over the skipped courses instead of the full list
    #[arg(short, long)]
    skipped: bool,

    /// Append to the existing CSV files instead of clearing them
    #[arg(short = 'n', long)]
    no_clear_db: bool,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of parallel workers (defaults to the number of cores)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

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

    if let Some(workers) = cli.workers {
        config.scraper.workers = Some(workers);
    }
    validate(&config)?;

    let options = RunOptions::from_flags(&config, cli.skipped, cli.no_clear_db);
    tracing::info!(
        "Reading {} ({} existing data), {} workers",
        options.course_file.display(),
        if options.clear_existing {
            "clearing"
        } else {
            "appending to"
        },
        config.scraper.worker_count()
    );

    let coordinator = Coordinator::new(config)?;
    match coordinator.run(&options).await {
        Ok(summary) => {
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
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
            0 => EnvFilter::new("timetable_scraper=info,warn"),
            1 => EnvFilter::new("timetable_scraper=debug,info"),
            2 => EnvFilter::new("timetable_scraper=trace,debug"),
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
