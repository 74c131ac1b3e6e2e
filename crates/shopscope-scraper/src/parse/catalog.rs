use serde::Deserialize;
use serde_json::Value;
use shopscope_core::ProductListing;
use url::Url;

use crate::client::resolve_href;
use crate::types::{CatalogPage, CatalogProduct};

const CATALOG_CURRENCY: &str = "USD";

/// Number of raw items on a catalog page, decodable or not.
///
/// Paging compares this against the requested page size, so skipped items
/// still count toward a full page.
#[must_use]
pub fn catalog_item_count(page: &Value) -> usize {
    page.get("products")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

/// Converts one `products.json` page into listings.
///
/// Items that fail to decode or have no title are skipped with a warning.
/// The feed carries no currency, so every priced item is tagged `"USD"`.
#[must_use]
pub fn parse_catalog(page: &Value, origin: &Url) -> Vec<ProductListing> {
    let page = match CatalogPage::deserialize(page) {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!(origin = %origin, error = %e, "catalog page has unexpected shape");
            return Vec::new();
        }
    };

    page.products
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let product = match CatalogProduct::deserialize(item) {
                Ok(product) => product,
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping undecodable catalog item");
                    return None;
                }
            };
            let listing = to_listing(product, origin);
            if listing.is_none() {
                tracing::warn!(index, "skipping catalog item without a title");
            }
            listing
        })
        .collect()
}

fn to_listing(product: CatalogProduct, origin: &Url) -> Option<ProductListing> {
    let title = product
        .title
        .as_deref()
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())?;

    let price = product
        .first_variant()
        .and_then(crate::types::CatalogVariant::price_string);
    let currency = price.as_ref().map(|_| CATALOG_CURRENCY.to_owned());

    let image_url = product
        .first_image()
        .and_then(|image| image.src.as_deref())
        .and_then(|src| resolve_href(origin, src))
        .map(String::from);

    let product_url = product
        .handle
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .and_then(|handle| origin.join(&format!("/products/{handle}")).ok())
        .map(String::from);

    Some(ProductListing {
        title,
        price,
        currency,
        image_url,
        product_url,
        description: product.body_html,
        product_type: product.product_type.filter(|t| !t.trim().is_empty()),
    })
}
