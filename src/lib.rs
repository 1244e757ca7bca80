//! Timetable Scraper: course schedule harvester
//!
//! This crate fetches per-course timetable pages from a university website,
//! extracts course, section and activity records from them with a pool of
//! concurrent workers, and writes the results as flat CSV files.

pub mod config;
pub mod crawler;
pub mod output;
pub mod records;

use thiserror::Error;

/// Main error type for run-level failures
///
/// Per-course failures never surface here; they are turned into
/// [`records::SkipReason`]s by the retry controller.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Failed to read course list {path}: {source}")]
    CourseList {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for scraper runs
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use records::{ActivityRecord, CourseCode, CourseRecord, SectionRecord, SkipReason};
pub use crawler::{extract, Coordinator, Outcome, RunOptions};
