//! Scrape coordinator - top-level run orchestration
//!
//! This module wires the pipeline together for one run:
//! - Loading the course list
//! - Building the fetcher, retry controller and worker pool
//! - Aggregating the results once every worker has finished
//! - Writing the output files and the skip list

use crate::config::Config;
use crate::crawler::aggregator::aggregate;
use crate::crawler::fetcher::{build_http_client, Fetcher, HttpFetcher};
use crate::crawler::retry::{RetryController, RetryPolicy};
use crate::crawler::scheduler::WorkerPool;
use crate::output::{write_lines, write_skip_list, RunSummary};
use crate::records::CourseCode;
use crate::ScrapeError;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

/// Per-invocation choices that are not part of the configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// File of course codes to process
    pub course_file: PathBuf,

    /// Truncate the CSV files instead of appending to them
    pub clear_existing: bool,
}

impl RunOptions {
    /// Derives options from the command-line switches
    ///
    /// Reading the skip list always appends to the existing CSV files.
    pub fn from_flags(config: &Config, skipped: bool, no_clear_db: bool) -> Self {
        let course_file = if skipped {
            &config.source.skipped_file
        } else {
            &config.source.courses_file
        };

        Self {
            course_file: PathBuf::from(course_file),
            clear_existing: !(no_clear_db || skipped),
        }
    }
}

/// Reads course codes, one per line, ignoring blank lines
pub fn load_course_codes(path: &Path) -> Result<Vec<CourseCode>, ScrapeError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScrapeError::CourseList {
        path: path.display().to_string(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(CourseCode::new)
        .collect())
}

/// Main scraper coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    pool: WorkerPool,
}

impl Coordinator {
    /// Creates a coordinator fetching over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrapeError)` - Invalid base URL or HTTP client setup failure
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let base_url = Url::parse(&config.source.base_url)?;
        let client = build_http_client(&config.user_agent, &config.scraper)?;
        let fetcher = HttpFetcher::new(client, base_url);

        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Creates a coordinator around any page source
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher>) -> Self {
        let policy = RetryPolicy::from(&config.scraper);
        let controller = Arc::new(RetryController::new(fetcher, policy));
        let pool = WorkerPool::new(config.scraper.worker_count(), controller);

        Self {
            config: Arc::new(config),
            pool,
        }
    }

    /// Runs the full pipeline once
    ///
    /// 1. Loads the course codes
    /// 2. Drains them through the worker pool
    /// 3. Writes the skip list
    /// 4. Aggregates and writes the three CSV files
    pub async fn run(&self, options: &RunOptions) -> Result<RunSummary, ScrapeError> {
        let started_at = Utc::now();

        let codes = load_course_codes(&options.course_file)?;
        tracing::info!(
            "Loaded {} course codes from {}",
            codes.len(),
            options.course_file.display()
        );
        let requested = codes.len();

        let report = self.pool.run(codes).await;
        tracing::info!(
            "Done work. Got {} courses, skipped {}",
            report.results.len(),
            report.skipped.len()
        );

        write_skip_list(Path::new(&self.config.source.skipped_file), &report.skipped)?;

        let mut output = aggregate(&report.results);
        if self.config.output.sort_output {
            output.sort();
        }

        let clear = options.clear_existing;
        let paths = &self.config.output;
        write_lines(Path::new(&paths.courses_path), &output.courses, clear)?;
        write_lines(Path::new(&paths.sections_path), &output.sections, clear)?;
        write_lines(Path::new(&paths.activities_path), &output.activities, clear)?;

        Ok(RunSummary {
            started_at,
            finished_at: Utc::now(),
            requested,
            courses: output.courses.len(),
            sections: output.sections.len(),
            activities: output.activities.len(),
            skipped: report.skipped,
        })
    }
}

/// Runs a complete scrape with the HTTP fetcher
///
/// # Example
///
/// ```no_run
/// use timetable_scraper::crawler::{run_scrape, RunOptions};
/// use timetable_scraper::Config;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let options = RunOptions::from_flags(&config, false, false);
/// let summary = run_scrape(config, &options).await?;
/// println!("{} courses", summary.courses);
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(
    config: Config,
    options: &RunOptions,
) -> Result<RunSummary, ScrapeError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run(options).await
}
