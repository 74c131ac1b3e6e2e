//! Response shape of the public `products.json` endpoint.
//!
//! Every field is optional. Storefronts differ (themes, apps, and older
//! stores omit fields), and one odd product must not sink the whole page,
//! so the response is decoded item by item: the page is first read as a
//! list of raw JSON values, then each value is decoded into
//! [`CatalogProduct`] on its own.
//!
//! ### `price` on variants
//! Normally a decimal string (`"12.00"`). Some proxies and headless setups
//! re-serialize it as a JSON number, so it is kept as a raw [`Value`] and
//! converted in [`CatalogVariant::price_string`].
//!
//! ### `product_type`
//! A plain string; may be empty (`""`). Empty is treated as absent when the
//! listing is built.
//!
//! ### `variants` / `images`
//! Either key may be missing, `null`, or hold `null` entries. All three
//! read as "no entry"; use [`CatalogProduct::first_variant`] and
//! [`CatalogProduct::first_image`] rather than the raw fields.
//!
//! ### `images[].src`
//! Usually an absolute CDN URL, occasionally protocol-relative or
//! store-relative. Resolved against the store origin by the catalog parser.

use serde::Deserialize;
use serde_json::Value;

/// Top-level response from `GET /products.json`, undecoded per item.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub products: Vec<Value>,
}

/// A single product from the catalog feed.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogProduct {
    #[serde(default)]
    pub title: Option<String>,

    /// URL slug for the product page (e.g. `"red-mug"`).
    #[serde(default)]
    pub handle: Option<String>,

    /// Raw HTML product description.
    #[serde(default)]
    pub body_html: Option<String>,

    #[serde(default)]
    pub product_type: Option<String>,

    #[serde(default)]
    pub variants: Option<Vec<Option<CatalogVariant>>>,

    #[serde(default)]
    pub images: Option<Vec<Option<CatalogImage>>>,
}

impl CatalogProduct {
    /// First non-null variant, if any.
    #[must_use]
    pub fn first_variant(&self) -> Option<&CatalogVariant> {
        self.variants.iter().flatten().flatten().next()
    }

    /// First non-null image, if any.
    #[must_use]
    pub fn first_image(&self) -> Option<&CatalogImage> {
        self.images.iter().flatten().flatten().next()
    }
}

/// A purchasable variant of a [`CatalogProduct`].
#[derive(Debug, Default, Deserialize)]
pub struct CatalogVariant {
    #[serde(default)]
    pub price: Option<Value>,
}

impl CatalogVariant {
    /// The variant price as a decimal string, whether the feed sent a string
    /// or a number. `null`, empty strings and other shapes yield `None`.
    #[must_use]
    pub fn price_string(&self) -> Option<String> {
        match self.price.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogImage {
    #[serde(default)]
    pub src: Option<String>,
}
