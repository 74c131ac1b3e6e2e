//! The store-intelligence record and its parts.
//!
//! A [`StoreRecord`] is the aggregate produced by one extraction run against
//! one storefront origin. It is assembled through [`StoreRecordBuilder`] and
//! is not mutated after [`StoreRecordBuilder::build`].
//!
//! All URL-typed fields hold absolute `http(s)` URLs serialized as strings.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Aggregate of everything extracted from a single storefront origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    /// Normalized store URL (e.g. `"https://shop.example/"`). Unique key.
    pub origin: String,
    /// `<title>` of the homepage with platform attribution suffixes stripped.
    pub display_name: Option<String>,
    /// Listings from the machine-readable `products.json` feed.
    pub catalog: Vec<ProductListing>,
    /// Listings surfaced on the rendered homepage.
    pub hero_products: Vec<ProductListing>,
    pub privacy_policy: Option<Policy>,
    pub return_refund_policy: Option<Policy>,
    /// May contain duplicates; the FAQ parser combines two strategies.
    pub faqs: Vec<QaPair>,
    /// Unique by `url`.
    pub social_handles: Vec<SocialHandle>,
    pub contact_details: Option<ContactInfo>,
    pub about_text: Option<String>,
    /// Unique by `url`.
    pub important_links: Vec<ImportantLink>,
    pub fetched_at: DateTime<Utc>,
}

impl StoreRecord {
    /// Returns the policy of the given kind, if one was extracted.
    #[must_use]
    pub fn policy(&self, kind: PolicyKind) -> Option<&Policy> {
        match kind {
            PolicyKind::Privacy => self.privacy_policy.as_ref(),
            PolicyKind::ReturnRefund => self.return_refund_policy.as_ref(),
        }
    }

    /// Total listings across the catalog feed and homepage.
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.catalog.len() + self.hero_products.len()
    }
}

/// A product as seen either in the JSON catalog or on the homepage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListing {
    pub title: String,
    /// Decimal string exactly as found, with thousands separators removed
    /// (e.g. `"1299.00"`).
    pub price: Option<String>,
    /// ISO 4217 code inferred from the price symbol, `"USD"` for the catalog
    /// feed, or `"Unknown"` when a homepage price has no recognized symbol.
    pub currency: Option<String>,
    pub image_url: Option<String>,
    pub product_url: Option<String>,
    /// Raw `body_html` from the catalog feed. Always `None` for hero products.
    pub description: Option<String>,
    /// Catalog `product_type`; empty strings are stored as `None`.
    pub product_type: Option<String>,
}

impl ProductListing {
    /// A listing with only a title set.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: None,
            currency: None,
            image_url: None,
            product_url: None,
            description: None,
            product_type: None,
        }
    }
}

/// The two policy pages tracked per store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Privacy,
    ReturnRefund,
}

impl PolicyKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Privacy => "privacy_policy",
            PolicyKind::ReturnRefund => "return_refund_policy",
        }
    }

    /// Title used when the policy page has no `<h1>`: the kind name in title case.
    #[must_use]
    pub fn fallback_title(self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PolicyKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "privacy_policy" => Ok(PolicyKind::Privacy),
            "return_refund_policy" => Ok(PolicyKind::ReturnRefund),
            other => Err(CoreError::UnknownPolicyKind(other.to_string())),
        }
    }
}

/// A legal or informational page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub title: String,
    pub content: String,
    /// The exact page the policy was parsed from.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Facebook,
    Instagram,
    Twitter,
    Linkedin,
    Youtube,
    Pinterest,
    Tiktok,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 7] = [
        SocialPlatform::Facebook,
        SocialPlatform::Instagram,
        SocialPlatform::Twitter,
        SocialPlatform::Linkedin,
        SocialPlatform::Youtube,
        SocialPlatform::Pinterest,
        SocialPlatform::Tiktok,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Linkedin => "linkedin",
            SocialPlatform::Youtube => "youtube",
            SocialPlatform::Pinterest => "pinterest",
            SocialPlatform::Tiktok => "tiktok",
        }
    }
}

impl std::fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SocialPlatform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SocialPlatform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownPlatform(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialHandle {
    pub platform: SocialPlatform,
    pub url: String,
    pub username: Option<String>,
}

/// Contact details scraped from page text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub emails: BTreeSet<String>,
    /// Digit groups concatenated, e.g. `"15551234567"`.
    pub phone_numbers: BTreeSet<String>,
}

impl ContactInfo {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phone_numbers.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportantLink {
    /// Anchor text, or the matched category label when the anchor has no text.
    pub label: String,
    pub url: String,
}

/// Incremental assembly of a [`StoreRecord`].
///
/// The extractor fills one field per stage; fields never set keep their
/// empty/absent default.
#[derive(Debug, Clone)]
pub struct StoreRecordBuilder {
    origin: String,
    display_name: Option<String>,
    catalog: Vec<ProductListing>,
    hero_products: Vec<ProductListing>,
    privacy_policy: Option<Policy>,
    return_refund_policy: Option<Policy>,
    faqs: Vec<QaPair>,
    social_handles: Vec<SocialHandle>,
    contact_details: Option<ContactInfo>,
    about_text: Option<String>,
    important_links: Vec<ImportantLink>,
}

impl StoreRecordBuilder {
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            display_name: None,
            catalog: Vec::new(),
            hero_products: Vec::new(),
            privacy_policy: None,
            return_refund_policy: None,
            faqs: Vec::new(),
            social_handles: Vec::new(),
            contact_details: None,
            about_text: None,
            important_links: Vec::new(),
        }
    }

    pub fn display_name(&mut self, name: Option<String>) -> &mut Self {
        self.display_name = name.filter(|n| !n.is_empty());
        self
    }

    pub fn catalog(&mut self, catalog: Vec<ProductListing>) -> &mut Self {
        self.catalog = catalog;
        self
    }

    pub fn hero_products(&mut self, products: Vec<ProductListing>) -> &mut Self {
        self.hero_products = products;
        self
    }

    pub fn policy(&mut self, kind: PolicyKind, policy: Option<Policy>) -> &mut Self {
        match kind {
            PolicyKind::Privacy => self.privacy_policy = policy,
            PolicyKind::ReturnRefund => self.return_refund_policy = policy,
        }
        self
    }

    pub fn faqs(&mut self, faqs: Vec<QaPair>) -> &mut Self {
        self.faqs = faqs;
        self
    }

    pub fn social_handles(&mut self, handles: Vec<SocialHandle>) -> &mut Self {
        self.social_handles = handles;
        self
    }

    /// Empty contact sets are stored as `None`.
    pub fn contact_details(&mut self, contact: ContactInfo) -> &mut Self {
        self.contact_details = (!contact.is_empty()).then_some(contact);
        self
    }

    pub fn about_text(&mut self, text: Option<String>) -> &mut Self {
        self.about_text = text;
        self
    }

    pub fn important_links(&mut self, links: Vec<ImportantLink>) -> &mut Self {
        self.important_links = links;
        self
    }

    #[must_use]
    pub fn has_catalog(&self) -> bool {
        !self.catalog.is_empty()
    }

    /// Finalizes the record, stamping it with `fetched_at`.
    #[must_use]
    pub fn build(self, fetched_at: DateTime<Utc>) -> StoreRecord {
        StoreRecord {
            origin: self.origin,
            display_name: self.display_name,
            catalog: self.catalog,
            hero_products: self.hero_products,
            privacy_policy: self.privacy_policy,
            return_refund_policy: self.return_refund_policy,
            faqs: self.faqs,
            social_handles: self.social_handles,
            contact_details: self.contact_details,
            about_text: self.about_text,
            important_links: self.important_links,
            fetched_at,
        }
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
