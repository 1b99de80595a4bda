//! HTTP client for the insider trading listings.

use insider_core::{FinvizConfig, Side};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;

use crate::error::{Result, ScrapeError};

fn default_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    h.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    h
}

/// Fetches raw listing pages.
#[derive(Debug, Clone)]
pub struct FinvizClient {
    http: Client,
}

impl FinvizClient {
    /// Builds a client with the configured user agent and timeout.
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(config: &FinvizConfig) -> Result<Self> {
        let http = Client::builder()
            .default_headers(default_headers())
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http })
    }

    /// Downloads one listing page and returns its body.
    ///
    /// # Errors
    /// Returns a side-labelled error on transport failure or non-2xx status.
    pub async fn fetch_listing(&self, side: Side, url: &str) -> Result<String> {
        tracing::debug!(%side, url, "GET listing");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Fetch { side, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                side,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| ScrapeError::Fetch { side, source })
    }
}
