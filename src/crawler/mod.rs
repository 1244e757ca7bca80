//! Crawler module for course page fetching and processing
//!
//! This module contains the core scraping pipeline, including:
//! - HTTP fetching with classified errors
//! - Course page extraction over a DOM query abstraction
//! - Bounded retries per course
//! - The worker pool draining the course queue
//! - Aggregation and overall run coordination

mod aggregator;
mod coordinator;
pub mod dom;
mod extractor;
mod fetcher;
mod retry;
mod scheduler;

pub use aggregator::{aggregate, Aggregate};
pub use coordinator::{load_course_codes, run_scrape, Coordinator, RunOptions};
pub use extractor::{extract, extract_course, ExtractError};
pub use fetcher::{build_http_client, FetchError, Fetcher, HttpFetcher};
pub use retry::{Outcome, RetryController, RetryPolicy};
pub use scheduler::{PoolReport, ResultsSink, Sink, SkipSink, WorkQueue, WorkerPool};
