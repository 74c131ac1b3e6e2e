//! Store command handlers for the CLI.
//!
//! Called from `main` once configuration is loaded. Records are printed to
//! stdout as pretty JSON.

use anyhow::Context;
use shopscope_core::{AppConfig, StoreRecord, StoreRepository};
use shopscope_db::PgStoreRepository;
use shopscope_scraper::{ExtractionRules, Extractor, StorefrontClient};

/// Builds an extractor over a live HTTP client with the default rules.
pub(crate) fn build_extractor(config: &AppConfig) -> anyhow::Result<Extractor<StorefrontClient>> {
    let client = StorefrontClient::from_config(config)
        .context("failed to build storefront client")?;
    Ok(Extractor::new(
        client,
        ExtractionRules::default(),
        config.catalog_max_pages,
    ))
}

/// Extract (or serve from the database) the record for `url`.
///
/// With `dry_run` the database is never touched and a fresh extraction is
/// always run; `refresh` has no effect.
///
/// # Errors
///
/// Returns an error if the URL is invalid, nothing could be extracted, or
/// the database is unreachable (non-dry-run only).
pub(crate) async fn run_extract(
    config: &AppConfig,
    url: &str,
    refresh: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let extractor = build_extractor(config)?;

    let record = if dry_run {
        tracing::info!(url, "dry-run: extracting without persistence");
        extractor.extract(url).await?
    } else {
        let repo = connect_repository(config).await?;
        extractor.insights(url, &repo, refresh).await?
    };

    print_record(&record)
}

/// Print the stored record for `url`.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the database is unreachable, or
/// no record is stored for the store.
pub(crate) async fn run_show(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let origin = shopscope_scraper::normalize_store_url(url)?;
    let repo = connect_repository(config).await?;

    let Some(record) = repo.load(origin.as_str()).await? else {
        anyhow::bail!("no stored record for {origin}; run `shopscope extract` first");
    };

    print_record(&record)
}

async fn connect_repository(config: &AppConfig) -> anyhow::Result<PgStoreRepository> {
    let pool = shopscope_db::connect_pool_from_config(config).await?;
    Ok(PgStoreRepository::new(pool))
}

fn print_record(record: &StoreRecord) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}
