//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the HTTP client with a proper user agent string
//! - Templating the course page URL from the configured base URL
//! - Classifying failures into server-side and network-level errors
//!
//! Retries are not handled here; see [`crate::crawler::RetryController`].

use crate::config::{ScraperConfig, UserAgentConfig};
use crate::records::{CourseCode, SkipReason};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Classified failure of a single fetch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("Server error {status}: {reason}")]
    Server { status: u16, reason: String },

    /// Connection, TLS, DNS, timeout or body read failure
    #[error("Internet problem: {reason}")]
    Network { reason: String },
}

impl FetchError {
    /// The skip reason recorded when this error exhausts the retry budget
    pub fn exhausted_reason(&self) -> SkipReason {
        match self {
            FetchError::Server { .. } => SkipReason::RetriesExhaustedHttpError,
            FetchError::Network { .. } => SkipReason::RetriesExhaustedUrlError,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        let reason = if e.is_timeout() {
            "Request timeout".to_string()
        } else if e.is_connect() {
            format!("Connection failed: {}", e)
        } else {
            e.to_string()
        };
        FetchError::Network { reason }
    }
}

/// Source of raw course pages
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the timetable page of one course
    async fn fetch(&self, code: &CourseCode) -> Result<Vec<u8>, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `scraper` - Timeout settings
///
/// # Example
///
/// ```no_run
/// use timetable_scraper::config::{ScraperConfig, UserAgentConfig};
/// use timetable_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &ScraperConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    scraper: &ScraperConfig,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        user_agent.crawler_name,
        user_agent.crawler_version,
        user_agent.contact_url,
        user_agent.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(scraper.request_timeout_secs))
        .connect_timeout(Duration::from_secs(scraper.connect_timeout_secs))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches course pages over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Builds `<base-url>?code=<code>`, keeping any query the base URL already has
    pub fn course_url(&self, code: &CourseCode) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("code", code.as_str());
        url
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, code: &CourseCode) -> Result<Vec<u8>, FetchError> {
        let url = self.course_url(code);
        tracing::debug!("GET {}", url);

        // The response owns the connection; dropping it on any return path
        // hands the connection back to the pool.
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Server {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
