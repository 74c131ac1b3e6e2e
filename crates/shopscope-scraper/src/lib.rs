pub mod client;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod parse;
pub mod rules;
pub mod types;

pub use client::{normalize_store_url, platform_hint, PlatformHint, StorefrontClient};
pub use error::ScraperError;
pub use extract::Extractor;
pub use fetch::PageFetcher;
pub use rules::ExtractionRules;
