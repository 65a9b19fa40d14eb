//! HTTP fetching for shelf pages
//!
//! The shelf site blocks obvious bots, so the client identifies itself with
//! a browser-like user agent rather than a crawler string. Every request is
//! bounded by an explicit timeout; there are no retries and no unbounded
//! waits.

use crate::SpineError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds the HTTP client used for shelf pages and cover downloads
///
/// # Arguments
///
/// * `user_agent` - The user agent header value, typically browser-like
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one shelf page and returns its body text
///
/// Failures are classified the way callers need to branch on them:
///
/// * request timeout -> [`SpineError::Timeout`]
/// * non-2xx response -> [`SpineError::Status`]
/// * anything else (connect, TLS, body read) -> [`SpineError::Http`]
pub async fn fetch_page(client: &Client, url: &Url, timeout: Duration) -> Result<String, SpineError> {
    let response = client
        .get(url.clone())
        .timeout(timeout)
        .send()
        .await
        .map_err(|source| classify(url, source))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SpineError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|source| classify(url, source))
}

fn classify(url: &Url, source: reqwest::Error) -> SpineError {
    if source.is_timeout() {
        SpineError::Timeout {
            url: url.to_string(),
        }
    } else {
        SpineError::Http {
            url: url.to_string(),
            source,
        }
    }
}
