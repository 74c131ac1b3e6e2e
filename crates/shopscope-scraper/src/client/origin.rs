//! Store URL normalization and href resolution.

use url::Url;

use crate::error::ScraperError;

/// Host suffixes that identify a store served directly by the platform.
const HOSTED_STORE_SUFFIXES: [&str; 3] = [".myshopify.com", ".shopifyplus.com", ".shopifypreview.com"];

/// How plausible it is that a host serves a Shopify storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformHint {
    /// Host is under one of the platform's own domains.
    HostedStorefront,
    /// Any other host. Accepted; the fetches decide whether it is a store.
    CustomDomain,
}

/// Normalizes a user-supplied store URL.
///
/// - prepends `https://` when no `http://` or `https://` prefix is present
/// - lowercases scheme and host
/// - an empty path becomes `/`; any other path keeps its case and shape
/// - query and fragment are preserved
///
/// Normalizing an already-normalized URL returns it unchanged, so the result
/// can be used as the record key.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidShopUrl`] when the input is empty, uses a
/// scheme other than `http`/`https`, or does not parse to a URL with a host.
pub fn normalize_store_url(raw: &str) -> Result<Url, ScraperError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid(raw, "URL is empty"));
    }

    let candidate = match trimmed.split_once("://") {
        Some((scheme, _))
            if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") =>
        {
            trimmed.to_owned()
        }
        Some((scheme, _)) if !scheme.is_empty() && !scheme.contains(['/', '.', '?', '#']) => {
            return Err(invalid(raw, &format!("unsupported scheme \"{scheme}\"")));
        }
        _ => format!("https://{trimmed}"),
    };

    let url = Url::parse(&candidate).map_err(|e| invalid(raw, &e.to_string()))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(raw, "URL has no host"));
    }

    Ok(url)
}

/// Classifies the host of an already-normalized store URL.
#[must_use]
pub fn platform_hint(url: &Url) -> PlatformHint {
    let host = url.host_str().unwrap_or_default();
    if HOSTED_STORE_SUFFIXES
        .iter()
        .any(|suffix| host.ends_with(suffix))
    {
        PlatformHint::HostedStorefront
    } else {
        PlatformHint::CustomDomain
    }
}

/// Resolves an `href`/`src` attribute against `base`.
///
/// Returns `None` for empty values, fragment-only links, `javascript:` links,
/// unparseable values, and anything that does not resolve to `http(s)`.
/// `&amp;` left undecoded by templates is repaired before joining.
#[must_use]
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    if href
        .get(..11)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("javascript:"))
    {
        return None;
    }

    let href = href.replace("&amp;", "&");
    let resolved = base.join(&href).ok()?;
    matches!(resolved.scheme(), "http" | "https").then_some(resolved)
}

fn invalid(raw: &str, reason: &str) -> ScraperError {
    ScraperError::InvalidShopUrl {
        shop_url: raw.to_owned(),
        reason: reason.to_owned(),
    }
}
