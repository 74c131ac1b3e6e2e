use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("page not found: {url}")]
    PageNotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid shop URL \"{shop_url}\": {reason}")]
    InvalidShopUrl { shop_url: String, reason: String },

    /// Neither the catalog feed, homepage products, nor the homepage itself
    /// could be obtained.
    #[error("no usable storefront content found at {origin}")]
    NotFound { origin: String },

    #[error("failed to persist or load record for {origin}: {reason}")]
    Persistence { origin: String, reason: String },
}
