//! The extraction pipeline: fetch, parse, assemble one [`StoreRecord`].

use chrono::Utc;
use scraper::Html;
use shopscope_core::{PolicyKind, ProductListing, StoreRecord, StoreRecordBuilder, StoreRepository};
use url::Url;

use crate::client::{normalize_store_url, platform_hint};
use crate::discovery::discover_link;
use crate::error::ScraperError;
use crate::fetch::PageFetcher;
use crate::parse;
use crate::rules::{ExtractionRules, TopicRule};

/// Runs the extraction stages for a store against a [`PageFetcher`].
///
/// Stages run strictly in order and one request at a time: catalog feed,
/// homepage, policies, FAQ, then the homepage-derived fields. Every stage
/// degrades to an empty or absent field on its own; `extract` only fails
/// for bad input or when no content at all could be obtained.
///
/// Parsed documents never live across an `.await`; pages are kept as text
/// and parsed inside synchronous helpers.
#[derive(Debug)]
pub struct Extractor<F> {
    fetcher: F,
    rules: ExtractionRules,
    catalog_max_pages: u32,
}

impl<F: PageFetcher> Extractor<F> {
    pub fn new(fetcher: F, rules: ExtractionRules, catalog_max_pages: u32) -> Self {
        Self {
            fetcher,
            rules,
            catalog_max_pages,
        }
    }

    #[must_use]
    pub fn rules(&self) -> &ExtractionRules {
        &self.rules
    }

    /// Extracts a fresh record for `raw_url`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidShopUrl`] when `raw_url` cannot be normalized.
    /// - [`ScraperError::NotFound`] when the catalog, homepage products and
    ///   the homepage itself are all unavailable.
    pub async fn extract(&self, raw_url: &str) -> Result<StoreRecord, ScraperError> {
        let origin = normalize_store_url(raw_url)?;
        tracing::info!(
            origin = %origin,
            platform = ?platform_hint(&origin),
            "extracting storefront"
        );

        let mut builder = StoreRecordBuilder::new(origin.as_str());

        let catalog = self.fetch_catalog(&origin).await;
        tracing::info!(origin = %origin, count = catalog.len(), "catalog parsed");
        builder.catalog(catalog);

        // The homepage is always the site root, whatever path the input had.
        let root = site_root(&origin);
        let Some(homepage) = self.fetcher.fetch_page(&root).await else {
            if builder.has_catalog() {
                tracing::warn!(origin = %origin, "homepage unavailable; record has catalog only");
                return Ok(builder.build(Utc::now()));
            }
            tracing::warn!(origin = %origin, "no catalog and no homepage");
            return Err(ScraperError::NotFound {
                origin: origin.into(),
            });
        };

        let hero = with_document(&homepage, |doc| {
            parse::parse_hero_products(doc, &root, &self.rules)
        });
        tracing::info!(origin = %origin, count = hero.len(), "hero products parsed");
        builder.hero_products(hero);

        for kind in [PolicyKind::Privacy, PolicyKind::ReturnRefund] {
            let policy = self
                .fetch_topic(&root, &homepage, self.rules.policy_rule(kind), |doc, url| {
                    parse::parse_policy(doc, kind, url, &self.rules)
                })
                .await;
            tracing::info!(origin = %origin, kind = %kind, found = policy.is_some(), "policy stage done");
            builder.policy(kind, policy);
        }

        let faqs = self
            .fetch_topic(&root, &homepage, &self.rules.faq, |doc, _| {
                let faqs = parse::parse_faqs(doc, &self.rules);
                (!faqs.is_empty()).then_some(faqs)
            })
            .await
            .unwrap_or_default();
        tracing::info!(origin = %origin, count = faqs.len(), "faq stage done");
        builder.faqs(faqs);

        with_document(&homepage, |doc| {
            builder
                .social_handles(parse::parse_social_handles(doc, &root, &self.rules))
                .contact_details(parse::parse_contact_details(doc, &self.rules))
                .about_text(parse::parse_about_text(doc, &self.rules))
                .important_links(parse::parse_important_links(doc, &root, &self.rules))
                .display_name(parse::parse_display_name(doc, &self.rules));
        });

        let record = builder.build(Utc::now());
        tracing::info!(
            origin = %record.origin,
            products = record.product_count(),
            social = record.social_handles.len(),
            links = record.important_links.len(),
            "extraction complete"
        );
        Ok(record)
    }

    /// Extracts `raw_url` and replaces whatever `repo` held for its origin.
    ///
    /// # Errors
    ///
    /// Everything [`Self::extract`] returns, plus
    /// [`ScraperError::Persistence`] when the save fails.
    pub async fn extract_and_save<R: StoreRepository>(
        &self,
        raw_url: &str,
        repo: &R,
    ) -> Result<StoreRecord, ScraperError> {
        let record = self.extract(raw_url).await?;
        repo.save(&record)
            .await
            .map_err(|e| persistence(&record.origin, &e))?;
        tracing::info!(origin = %record.origin, "record saved");
        Ok(record)
    }

    /// Returns the stored record for `raw_url`, extracting and saving a new
    /// one when none is stored or `refresh` is set.
    ///
    /// # Errors
    ///
    /// [`ScraperError::InvalidShopUrl`], [`ScraperError::Persistence`] when
    /// loading fails, and everything [`Self::extract_and_save`] returns.
    pub async fn insights<R: StoreRepository>(
        &self,
        raw_url: &str,
        repo: &R,
        refresh: bool,
    ) -> Result<StoreRecord, ScraperError> {
        let origin = normalize_store_url(raw_url)?;

        if !refresh {
            let stored = repo
                .load(origin.as_str())
                .await
                .map_err(|e| persistence(origin.as_str(), &e))?;
            if let Some(record) = stored {
                tracing::info!(origin = %origin, fetched_at = %record.fetched_at, "serving stored record");
                return Ok(record);
            }
        }

        self.extract_and_save(origin.as_str(), repo).await
    }

    /// Pages through `products.json` until a page is missing, short, or the
    /// page limit is reached.
    async fn fetch_catalog(&self, origin: &Url) -> Vec<ProductListing> {
        let page_size = self.rules.catalog_page_size;
        let full_page = usize::try_from(page_size).unwrap_or(usize::MAX);
        let mut catalog = Vec::new();

        for page in 1..=self.catalog_max_pages {
            let Ok(url) = origin.join(&format!("/products.json?limit={page_size}&page={page}"))
            else {
                break;
            };
            let Some(json) = self.fetcher.fetch_json(&url).await else {
                break;
            };
            catalog.extend(parse::parse_catalog(&json, origin));
            if parse::catalog_item_count(&json) < full_page {
                break;
            }
        }

        catalog
    }

    /// Known paths first, then one homepage link-discovery candidate.
    ///
    /// The first known path that fetches ends the known-path scan. Discovery
    /// runs only if that page yielded nothing (or none fetched), and skips a
    /// candidate that was already tried as a known path.
    async fn fetch_topic<T>(
        &self,
        origin: &Url,
        homepage: &str,
        rule: &TopicRule,
        parse: impl Fn(&Html, &Url) -> Option<T>,
    ) -> Option<T> {
        let mut tried = Vec::with_capacity(rule.known_paths.len());

        for path in &rule.known_paths {
            let Ok(url) = origin.join(path) else {
                continue;
            };
            let body = self.fetcher.fetch_page(&url).await;
            if let Some(body) = body {
                if let Some(found) = parse_page(&body, &url, &parse) {
                    return Some(found);
                }
                tracing::debug!(url = %url, "known path fetched but yielded nothing");
                tried.push(url);
                break;
            }
            tried.push(url);
        }

        let candidate = with_document(homepage, |doc| discover_link(doc, &rule.fallback, origin))?;
        if tried.contains(&candidate) {
            tracing::debug!(url = %candidate, "discovered link already tried");
            return None;
        }
        tracing::debug!(url = %candidate, "fetching discovered link");
        let body = self.fetcher.fetch_page(&candidate).await?;
        parse_page(&body, &candidate, &parse)
    }
}

fn site_root(origin: &Url) -> Url {
    let mut root = origin.clone();
    root.set_path("/");
    root.set_query(None);
    root.set_fragment(None);
    root
}

fn with_document<T>(html: &str, read: impl FnOnce(&Html) -> T) -> T {
    let document = Html::parse_document(html);
    read(&document)
}

fn parse_page<T>(body: &str, url: &Url, parse: &impl Fn(&Html, &Url) -> Option<T>) -> Option<T> {
    let document = Html::parse_document(body);
    parse(&document, url)
}

fn persistence(origin: &str, error: &dyn std::error::Error) -> ScraperError {
    ScraperError::Persistence {
        origin: origin.to_owned(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
