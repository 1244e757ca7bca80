use serde::Deserialize;

/// Main configuration structure for the timetable scraper
///
/// Every section and key is optional; omitted values fall back to the
/// defaults used against the live timetable site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Where course codes and course pages come from
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Course page URL; the course code is appended as the `code` query parameter
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Full list of course codes, one per line
    #[serde(rename = "courses-file")]
    pub courses_file: String,

    /// Skip list written by the previous run, read back with `--skipped`
    #[serde(rename = "skipped-file")]
    pub skipped_file: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://web30.uottawa.ca/v3/SITS/timetable/Course.aspx".to_string(),
            courses_file: "courses.txt".to_string(),
            skipped_file: "skippedCourses.txt".to_string(),
        }
    }
}

/// Worker pool and retry behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Number of parallel workers; available parallelism when omitted
    pub workers: Option<usize>,

    /// Attempts per course before giving up on transient errors
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Wait after an HTTP status error (milliseconds)
    #[serde(rename = "server-error-delay-ms")]
    pub server_error_delay_ms: u64,

    /// Wait after a connection-level error (milliseconds)
    #[serde(rename = "network-error-delay-ms")]
    pub network_error_delay_ms: u64,

    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            workers: None,
            max_attempts: 5,
            server_error_delay_ms: 2000,
            network_error_delay_ms: 5000,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl ScraperConfig {
    /// Resolves the worker count, falling back to the number of available cores
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the scraper
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the scraper
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the scraper
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for scraper-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "TimetableScraper".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    #[serde(rename = "courses-path")]
    pub courses_path: String,

    #[serde(rename = "sections-path")]
    pub sections_path: String,

    #[serde(rename = "activities-path")]
    pub activities_path: String,

    /// Sort each output collection before writing
    #[serde(rename = "sort-output")]
    pub sort_output: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            courses_path: "db_courses.csv".to_string(),
            sections_path: "db_sections.csv".to_string(),
            activities_path: "db_activities.csv".to_string(),
            sort_output: false,
        }
    }
}
