//! The fetch contract consumed by the extraction pipeline.

use std::future::Future;

use serde_json::Value;
use url::Url;

use crate::client::StorefrontClient;
use crate::error::ScraperError;

/// Source of raw storefront documents.
///
/// Both methods return `None` on any failure (connection error, timeout,
/// non-2xx status, malformed JSON). Callers treat `None` as "feature not
/// available" and carry on; a fetch failure never aborts an extraction.
pub trait PageFetcher {
    /// Returns the HTML body of the page at `url`.
    fn fetch_page(&self, url: &Url) -> impl Future<Output = Option<String>> + Send;

    /// Returns the parsed JSON document at `url`.
    fn fetch_json(&self, url: &Url) -> impl Future<Output = Option<Value>> + Send;
}

impl<T: PageFetcher + Sync> PageFetcher for &T {
    fn fetch_page(&self, url: &Url) -> impl Future<Output = Option<String>> + Send {
        (**self).fetch_page(url)
    }

    fn fetch_json(&self, url: &Url) -> impl Future<Output = Option<Value>> + Send {
        (**self).fetch_json(url)
    }
}

impl PageFetcher for StorefrontClient {
    async fn fetch_page(&self, url: &Url) -> Option<String> {
        self.get_text(url).await.map_err(|e| log_failure(url, &e)).ok()
    }

    async fn fetch_json(&self, url: &Url) -> Option<Value> {
        self.get_json(url).await.map_err(|e| log_failure(url, &e)).ok()
    }
}

fn log_failure(url: &Url, error: &ScraperError) {
    match error {
        // Missing pages are expected while probing conventional paths.
        ScraperError::PageNotFound { .. } => {
            tracing::debug!(url = %url, "page not found");
        }
        _ => {
            tracing::warn!(url = %url, error = %error, "fetch failed; treating as absent");
        }
    }
}
