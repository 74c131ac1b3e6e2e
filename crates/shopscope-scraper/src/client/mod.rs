//! HTTP client for storefront pages and JSON endpoints.

mod origin;

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::ScraperError;

pub use origin::{normalize_store_url, platform_hint, resolve_href, PlatformHint};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml";
const ACCEPT_JSON: &str = "application/json";

/// HTTP client for a storefront's HTML pages and JSON endpoints.
///
/// Non-2xx responses surface as typed errors: 404 as
/// [`ScraperError::PageNotFound`], anything else as
/// [`ScraperError::UnexpectedStatus`]. There is no retry policy; a failed
/// request is reported once and left to the caller.
///
/// The [`crate::PageFetcher`] implementation on this type turns every error
/// into absence, which is what the extraction pipeline consumes.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    client: Client,
}

impl StorefrontClient {
    /// Creates a `StorefrontClient` with a bounded request timeout and a
    /// descriptive `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        connect_timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Builds a client from the scraper settings in [`shopscope_core::AppConfig`].
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn from_config(config: &shopscope_core::AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            config.scraper_request_timeout_secs,
            config.scraper_connect_timeout_secs,
            &config.scraper_user_agent,
        )
    }

    /// Fetches `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::PageNotFound`]: HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ScraperError::Http`]: network, TLS, timeout, or body read failure.
    pub async fn get_text(&self, url: &Url) -> Result<String, ScraperError> {
        let response = self.send(url, ACCEPT_HTML).await?;
        Ok(response.text().await?)
    }

    /// Fetches `url` and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Everything [`Self::get_text`] returns, plus
    /// [`ScraperError::Deserialize`] when the body is not valid JSON.
    pub async fn get_json(&self, url: &Url) -> Result<serde_json::Value, ScraperError> {
        let response = self.send(url, ACCEPT_JSON).await?;
        let body = response.text().await?;
        serde_json::from_str::<serde_json::Value>(&body).map_err(|e| ScraperError::Deserialize {
            context: format!("JSON document from {url}"),
            source: e,
        })
    }

    async fn send(&self, url: &Url, accept: &str) -> Result<reqwest::Response, ScraperError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::PageNotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
