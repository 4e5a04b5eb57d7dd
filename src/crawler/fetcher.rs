//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building one HTTP client with the browser identity and timeout
//! - GET requests with query parameters
//! - Bounded retries with exponential backoff
//! - Parsing successful responses into an HTML document
//!
//! Failures never escape as errors: after the last attempt the caller gets
//! `None` and decides whether to skip the page or end the stage.

use crate::config::HttpConfig;
use reqwest::{header, Client};
use scraper::Html;
use std::collections::BTreeMap;
use std::time::Duration;

/// Builds the HTTP client shared by every request of a run
///
/// # Example
///
/// ```no_run
/// use speaker_harvest::config::HttpConfig;
/// use speaker_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("text/html,application/xhtml+xml,*/*;q=0.8"),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static("en-GB,en;q=0.9"),
    );

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(config.timeout())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Delay to wait before the given attempt (0-based)
///
/// The first attempt starts immediately; attempt `k` waits `2^k` units.
pub fn backoff_delay(attempt_index: u32, unit: Duration) -> Duration {
    if attempt_index == 0 {
        Duration::ZERO
    } else {
        unit.saturating_mul(2u32.saturating_pow(attempt_index))
    }
}

/// The delays preceding each of `max_attempts` attempts
///
/// For three attempts with a one-second unit this is `[0s, 2s, 4s]`.
pub fn backoff_schedule(max_attempts: u32, unit: Duration) -> Vec<Duration> {
    (0..max_attempts)
        .map(|attempt| backoff_delay(attempt, unit))
        .collect()
}

/// Issues GET requests with a fixed attempt budget
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    max_attempts: u32,
    backoff_unit: Duration,
}

impl Fetcher {
    /// Builds a fetcher and its client from the HTTP configuration
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config)?;
        Ok(Self::with_client(
            client,
            config.max_attempts,
            config.backoff_unit(),
        ))
    }

    /// Wraps an existing client
    pub fn with_client(client: Client, max_attempts: u32, backoff_unit: Duration) -> Self {
        Self {
            client,
            max_attempts: max_attempts.max(1),
            backoff_unit,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Fetches a page and parses it, retrying transient failures
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | Connection error / timeout | Retry |
    /// | Non-2xx status | Retry |
    /// | Body read failure | Retry |
    /// | Attempts exhausted | `None` |
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to fetch
    /// * `params` - Query parameters appended to the URL
    ///
    /// # Returns
    ///
    /// The parsed document, or `None` when every attempt failed
    pub async fn fetch(&self, url: &str, params: &BTreeMap<String, String>) -> Option<Html> {
        let body = self.fetch_body(url, params).await?;
        Some(Html::parse_document(&body))
    }

    /// Fetches the raw body text with the same retry policy as [`Fetcher::fetch`]
    pub async fn fetch_body(&self, url: &str, params: &BTreeMap<String, String>) -> Option<String> {
        for attempt in 0..self.max_attempts {
            let delay = backoff_delay(attempt, self.backoff_unit);
            if !delay.is_zero() {
                tracing::debug!(url, delay_ms = delay.as_millis() as u64, "Backing off");
                tokio::time::sleep(delay).await;
            }

            let number = attempt + 1;
            tracing::info!(url, attempt = number, max = self.max_attempts, "Requesting page");

            match self.attempt(url, params).await {
                Ok((final_url, body)) => {
                    tracing::info!(
                        url = %final_url,
                        attempt = number,
                        bytes = body.len(),
                        "Fetched page"
                    );
                    return Some(body);
                }
                Err(e) => {
                    tracing::warn!(url, attempt = number, error = %e, "Request failed");
                }
            }
        }

        tracing::error!(
            url,
            attempts = self.max_attempts,
            "Giving up on page after exhausting attempts"
        );
        None
    }

    /// A single GET; any failure, including a non-2xx status, is an error
    async fn attempt(
        &self,
        url: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<(String, String), reqwest::Error> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await?
            .error_for_status()?;

        let final_url = response.url().to_string();
        let body = response.text().await?;
        Ok((final_url, body))
    }
}
