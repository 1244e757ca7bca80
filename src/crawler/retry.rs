//! Bounded retries around fetch and extraction of one course
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | HTTP status error | Wait `server_error_delay`, retry |
//! | Network error | Wait `network_error_delay`, retry |
//! | Attempts exhausted | Skip with the last error's reason |
//! | No title / no sections | Skip immediately |
//! | Malformed page | Log, skip immediately |
//!
//! No wait follows the final attempt.

use crate::config::ScraperConfig;
use crate::crawler::extractor::{extract, ExtractError};
use crate::crawler::fetcher::{FetchError, Fetcher};
use crate::records::{CourseCode, ScrapedCourse, SkipReason, SkippedCourse};
use std::sync::Arc;
use std::time::Duration;

/// Attempt budget and backoff delays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub server_error_delay: Duration,
    pub network_error_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            server_error_delay: Duration::from_secs(2),
            network_error_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Wait before the next attempt after `error`
    pub fn delay_for(&self, error: &FetchError) -> Duration {
        match error {
            FetchError::Server { .. } => self.server_error_delay,
            FetchError::Network { .. } => self.network_error_delay,
        }
    }
}

impl From<&ScraperConfig> for RetryPolicy {
    fn from(config: &ScraperConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            server_error_delay: Duration::from_millis(config.server_error_delay_ms),
            network_error_delay: Duration::from_millis(config.network_error_delay_ms),
        }
    }
}

/// Final result of processing one course
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(ScrapedCourse),
    Skipped(SkippedCourse),
}

/// Runs fetch and extraction for one course under a [`RetryPolicy`]
pub struct RetryController {
    fetcher: Arc<dyn Fetcher>,
    policy: RetryPolicy,
}

impl RetryController {
    pub fn new(fetcher: Arc<dyn Fetcher>, policy: RetryPolicy) -> Self {
        Self { fetcher, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Processes one course to a terminal outcome
    ///
    /// # Arguments
    ///
    /// * `code` - The course to fetch and extract
    /// * `worker` - Name of the calling worker, used in log lines
    pub async fn process(&self, code: &CourseCode, worker: &str) -> Outcome {
        let mut attempt = 0;

        loop {
            attempt += 1;

            let error = match self.fetcher.fetch(code).await {
                Ok(body) => return self.extract_outcome(code, &body, worker),
                Err(e) => e,
            };

            if attempt >= self.policy.max_attempts {
                tracing::warn!(
                    "[{}] {}: {} on attempt {}/{}, skipping course",
                    worker,
                    code,
                    error,
                    attempt,
                    self.policy.max_attempts
                );
                return Outcome::Skipped(SkippedCourse {
                    code: code.clone(),
                    reason: error.exhausted_reason(),
                });
            }

            let delay = self.policy.delay_for(&error);
            tracing::warn!(
                "[{}] {}: {} on attempt {}/{}, waiting {:?}",
                worker,
                code,
                error,
                attempt,
                self.policy.max_attempts,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }

    fn extract_outcome(&self, code: &CourseCode, body: &[u8], worker: &str) -> Outcome {
        let reason = match extract(code, body) {
            Ok(scraped) => return Outcome::Success(scraped),
            Err(ExtractError::NoTitle) => SkipReason::NoTitle,
            Err(ExtractError::NoSections) => SkipReason::NoSections,
            Err(e) => {
                tracing::error!(
                    "Error in {} with course {}: {}; abandoning course",
                    worker,
                    code,
                    e
                );
                SkipReason::Malformed(e.to_string())
            }
        };

        tracing::debug!("[{}] {} skipped: {}", worker, code, reason);
        Outcome::Skipped(SkippedCourse {
            code: code.clone(),
            reason,
        })
    }
}
