//! Schedule scrapers for the two broadcasters.
//!
//! Each scraper follows the same contract: given the target Monday, issue
//! one GET against the broadcaster's schedule endpoint and return a
//! [`FetchOutcome`](crate::models::FetchOutcome) — either the normalized
//! program list or a failure reason. A scraper never panics past its own
//! boundary and never affects the other source.
//!
//! # Sources
//!
//! | Source | Module | Feed shape | Notes |
//! |--------|--------|------------|-------|
//! | SBS Power FM | [`sbs`] | Per-day JSON (HTML table fallback) | Already time-ordered upstream |
//! | KBS Cool FM | [`kbs`] | Multi-day, multi-channel slot feed | Needs channel filter + slot merge |
//!
//! # Common Patterns
//!
//! Scrapers use:
//! - A shared `reqwest` client with a fixed User-Agent and request timeout
//! - Graceful degradation: transport and shape failures become `Failed`
//! - Per-item filtering: malformed times or missing titles are skipped silently

use reqwest::Client;
use std::time::Duration;

pub mod kbs;
pub mod sbs;

/// User-Agent sent with every schedule request.
pub const USER_AGENT: &str = "schedule-bot/1.0 (+github actions)";

/// Per-request timeout; a timeout is handled like any transport failure.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the HTTP client both scrapers use.
pub fn http_client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}

/// Fetch a URL and return the response body, folding every failure mode
/// (client construction, transport, non-2xx status, body read) into a
/// single reason string for the `Failed` outcome.
pub(crate) async fn fetch_text(url: &str) -> Result<String, String> {
    let client = http_client().map_err(|e| format!("http client: {e}"))?;
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("unexpected status {status}"));
    }
    response
        .text()
        .await
        .map_err(|e| format!("body read failed: {e}"))
}
