//! HTTP fetcher
//!
//! This module owns all network I/O for the crawler: building the HTTP
//! client with a proper user-agent string, fetching pages, and classifying
//! failures. Fetch failures never abort the crawl; they surface as
//! [`FetchOutcome::Unavailable`] and the page is discarded.

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of a page fetch
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched an HTML page
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// Page body content
        body: String,
    },

    /// Page could not be used; the URL is discarded
    Unavailable {
        /// Human-readable reason, used for debug logging only
        reason: String,
    },
}

/// Builds the HTTP client used for the whole crawl
///
/// The user agent follows the `CrawlerName/Version (+ContactURL; ContactEmail)`
/// convention so site operators can identify and reach us.
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and classifies the outcome
///
/// Unavailable cases:
/// - non-2xx status (including 404 and 429)
/// - non-HTML Content-Type
/// - timeout, connection failure, redirect trouble
/// - body read failure
pub async fn fetch_page(client: &Client, url: &Url) -> FetchOutcome {
    let response = match client.get(url.clone()).send().await {
        Ok(r) => r,
        Err(e) => {
            let reason = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                "connection failed".to_string()
            } else if e.is_redirect() {
                "too many redirects".to_string()
            } else {
                e.to_string()
            };
            return FetchOutcome::Unavailable { reason };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::Unavailable {
            reason: format!("HTTP {}", status.as_u16()),
        };
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    // Missing Content-Type is tolerated; wiki mirrors are sloppy about it
    if !content_type.is_empty() && !content_type.contains("text/html") {
        return FetchOutcome::Unavailable {
            reason: format!("expected HTML, got {}", content_type),
        };
    }

    let final_url = response.url().clone();

    match response.text().await {
        Ok(body) => FetchOutcome::Success { final_url, body },
        Err(e) => FetchOutcome::Unavailable {
            reason: format!("body read failed: {}", e),
        },
    }
}
