//! HTTP fetcher implementation
//!
//! This module handles every page request of a run, including:
//! - Building the HTTP client with the configured user agent
//! - Serving pages from the on-disk cache
//! - Retry logic for transient failures
//! - Error classification

use crate::config::FetchConfig;
use crate::fetch::cache::PageCache;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

const MAX_REDIRECTS: usize = 10;

/// Result of a single GET attempt
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Connection refused, reset, or timed out
    ConnectionError {
        /// Error description
        error: String,
    },

    /// Redirect chain exceeded the hop limit
    RedirectError {
        /// Error description
        error: String,
    },

    /// Any other client-side failure (body decoding, builder errors)
    OtherError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use abdullaheid_chef::config::FetchConfig;
/// use abdullaheid_chef::fetch::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends one GET request and classifies the outcome
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(e),
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => classify_error(e),
    }
}

fn classify_error(e: reqwest::Error) -> FetchResult {
    if e.is_redirect() {
        FetchResult::RedirectError {
            error: e.to_string(),
        }
    } else if e.is_connect() || e.is_timeout() {
        FetchResult::ConnectionError {
            error: e.to_string(),
        }
    } else {
        FetchResult::OtherError {
            error: e.to_string(),
        }
    }
}

/// Cached, retrying page fetcher
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP error status | Log, retry immediately |
/// | Too many redirects | Log, retry immediately |
/// | Connection error / timeout | Log, sleep `retry-delay-ms`, retry |
/// | Other client error | Log, retry immediately |
///
/// After `max-attempts` failures the page is treated as absent.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    cache: PageCache,
    max_attempts: u32,
    retry_delay: Duration,
}

impl Fetcher {
    /// Creates a fetcher whose cache keeps pages under `origin` forever
    pub fn new(config: &FetchConfig, origin: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            cache: PageCache::new(&config.cache_dir, origin, config.cache_ttl_secs),
            max_attempts: config.max_attempts,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Fetches a page body
    ///
    /// # Returns
    ///
    /// * `Some(String)` - Page body, from cache or network
    /// * `None` - Every attempt failed
    pub async fn fetch(&self, url: &str) -> Option<String> {
        if let Some(body) = self.cache.get(url) {
            tracing::debug!("Cache hit for {}", url);
            return Some(body);
        }

        for attempt in 1..=self.max_attempts {
            match fetch_url(&self.client, url).await {
                FetchResult::Success {
                    final_url,
                    status_code,
                    body,
                } => {
                    tracing::debug!(
                        "Fetched {} (HTTP {}, final URL {})",
                        url,
                        status_code,
                        final_url
                    );
                    self.cache.put(url, &body);
                    return Some(body);
                }
                FetchResult::HttpError { status_code } => {
                    tracing::info!("Error: HTTP {} for {}", status_code, url);
                }
                FetchResult::RedirectError { error } | FetchResult::OtherError { error } => {
                    tracing::info!("Error: {}", error);
                }
                FetchResult::ConnectionError { error } => {
                    tracing::info!(
                        "Connection error ({}), {} will be retried in {:?}",
                        error,
                        url,
                        self.retry_delay
                    );
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        tracing::warn!("Giving up on {} after {} attempts", url, self.max_attempts);
        None
    }
}
