//! HTTP fetcher implementation
//!
//! This module handles the outbound page fetch, including:
//! - Building the shared HTTP client with a proper user agent string
//! - GET requests with redirect following and a per-attempt timeout
//! - Immediate retries for timed-out attempts only
//! - Error classification

use crate::config::{SourceConfig, UserAgentConfig};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// Redirect hops followed before the request is abandoned
const MAX_REDIRECTS: usize = 10;

/// Why a page could not be fetched
///
/// Callers treat every variant the same way; the distinction only matters
/// for logs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out after {attempts} attempt(s)")]
    Timeout { attempts: u32 },

    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("network error: {message}")]
    Network { message: String },
}

/// Timeout and retry policy for a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Hard limit for a single attempt, body included
    pub timeout: Duration,

    /// Extra attempts allowed after a timed-out attempt
    pub max_retries: u32,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_retries: 2,
        }
    }
}

impl FetchPolicy {
    pub fn from_config(config: &SourceConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_seconds),
            max_retries: config.max_retries,
        }
    }

    /// Total number of attempts this policy allows
    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Outcome of a single attempt
enum AttemptError {
    /// Worth another attempt
    TimedOut,
    /// Final for this fetch
    Fatal(FetchError),
}

impl From<reqwest::Error> for AttemptError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AttemptError::TimedOut
        } else {
            AttemptError::Fatal(FetchError::Network {
                message: e.to_string(),
            })
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use aivi_news_bot::config::UserAgentConfig;
/// use aivi_news_bot::news::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: BotName/Version (+ContactURL)
    let user_agent = format!(
        "{}/{} (+{})",
        config.bot_name, config.bot_version, config.contact_url
    );

    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body, retrying timed-out attempts
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 2xx | Return body |
/// | Timeout (connect, response or body) | Retry immediately, up to `max_retries` times |
/// | Non-2xx status | Fail immediately |
/// | Connection refused / other transport error | Fail immediately |
///
/// Attempts run strictly one after another; there is no delay between them.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `policy` - Per-attempt timeout and retry bound
pub async fn fetch_page(client: &Client, url: &str, policy: &FetchPolicy) -> Result<String, FetchError> {
    let total = policy.total_attempts();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        tracing::info!(url, attempt, total, "Fetching page");

        match fetch_once(client, url, policy.timeout).await {
            Ok(body) => {
                tracing::debug!(url, attempt, bytes = body.len(), "Fetched page");
                return Ok(body);
            }
            Err(AttemptError::TimedOut) if attempt < total => {
                tracing::warn!(url, attempt, total, "Request timed out, retrying");
            }
            Err(AttemptError::TimedOut) => {
                tracing::error!(url, attempts = attempt, "Request timed out, giving up");
                return Err(FetchError::Timeout { attempts: attempt });
            }
            Err(AttemptError::Fatal(e)) => {
                tracing::error!(url, attempt, error = %e, "Fetch failed");
                return Err(e);
            }
        }
    }
}

async fn fetch_once(client: &Client, url: &str, timeout: Duration) -> Result<String, AttemptError> {
    let response = client.get(url).timeout(timeout).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AttemptError::Fatal(FetchError::Status {
            status: status.as_u16(),
        }));
    }

    Ok(response.text().await?)
}
