//! HTTP page fetcher
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building HTTP clients with a rotated user agent and proxy
//! - GET requests with per-request timeouts
//! - Linear backoff retry logic for transient failures
//!
//! Rotation is not attempt-sticky: every attempt takes a fresh identity and
//! proxy from the rotators. Because reqwest binds proxies at client-build
//! time, the client is rebuilt per attempt.

use crate::config::ScraperConfig;
use crate::rotate::{IdentityRotator, ProxyConfig, ProxyRotator};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Outcome of a single GET attempt, used only to decide retry
enum AttemptOutcome {
    /// 200 response with its body
    Body(String),

    /// Any non-200 status code
    Status(u16),

    /// Transport-level failure (timeout, connect error, bad proxy, ...)
    Transport(String),
}

/// Builds an HTTP client for one fetch attempt
///
/// # Arguments
///
/// * `user_agent` - User agent string for this attempt
/// * `timeout_secs` - Total per-request timeout in seconds
/// * `proxy` - Optional proxy configuration; `None` means direct connection
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client (e.g. malformed proxy URL)
pub fn build_http_client(
    user_agent: &str,
    timeout_secs: u64,
    proxy: Option<&ProxyConfig>,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true);

    if let Some(proxy) = proxy {
        builder = builder
            .proxy(reqwest::Proxy::http(&proxy.http)?)
            .proxy(reqwest::Proxy::https(&proxy.https)?);
    }

    builder.build()
}

/// Fetches one page with retry and linear backoff
///
/// Attempts up to `settings.max_retries` GET requests. Each attempt takes
/// the next user agent and proxy from the rotators. A 200 response returns
/// the body; any other status or transport error is a retryable failure,
/// with a sleep of `backoff_factor * attempt` seconds between attempts.
///
/// Exhausting all attempts returns `None` — absence of content, not an
/// error. The caller decides whether that ends the run.
pub async fn fetch_page(
    url: &str,
    settings: &ScraperConfig,
    identities: &mut IdentityRotator,
    proxies: &mut ProxyRotator,
) -> Option<String> {
    for attempt in 1..=settings.max_retries {
        match attempt_fetch(url, settings, identities, proxies).await {
            AttemptOutcome::Body(body) => return Some(body),
            AttemptOutcome::Status(code) => {
                tracing::warn!(
                    "Non-200 status code ({}) on attempt {} for {}",
                    code,
                    attempt,
                    url
                );
            }
            AttemptOutcome::Transport(error) => {
                tracing::warn!("Request error on attempt {} for {}: {}", attempt, url, error);
            }
        }

        if attempt < settings.max_retries {
            let sleep_time = settings.backoff_factor * f64::from(attempt);
            tracing::debug!("Sleeping {:.2}s before retry", sleep_time);
            tokio::time::sleep(Duration::from_secs_f64(sleep_time)).await;
        }
    }

    tracing::error!("All retries failed for URL: {}", url);
    None
}

/// Performs one GET attempt with a freshly rotated identity and proxy
async fn attempt_fetch(
    url: &str,
    settings: &ScraperConfig,
    identities: &mut IdentityRotator,
    proxies: &mut ProxyRotator,
) -> AttemptOutcome {
    let user_agent = identities.next_identity().to_string();
    let proxy = proxies.next_proxy().cloned();

    let client = match build_http_client(&user_agent, settings.request_timeout, proxy.as_ref()) {
        Ok(client) => client,
        Err(e) => return AttemptOutcome::Transport(e.to_string()),
    };

    match client
        .get(url)
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
    {
        Ok(response) => {
            let status = response.status();
            if status != StatusCode::OK {
                return AttemptOutcome::Status(status.as_u16());
            }
            match response.text().await {
                Ok(body) => AttemptOutcome::Body(body),
                Err(e) => AttemptOutcome::Transport(e.to_string()),
            }
        }
        Err(e) => AttemptOutcome::Transport(e.to_string()),
    }
}
