//! Best-guess link lookup for topic pages the store keeps off the
//! conventional paths.

use regex::Regex;
use scraper::Html;
use url::Url;

use crate::client::resolve_href;
use crate::parse::{collapsed_text, ANCHORS};

/// First anchor, in document order, whose text or `href` matches `pattern`,
/// resolved against `origin`.
///
/// Anchors that match but do not resolve to an `http(s)` URL are passed
/// over. Case sensitivity is up to `pattern`.
#[must_use]
pub fn discover_link(document: &Html, pattern: &Regex, origin: &Url) -> Option<Url> {
    document.select(&ANCHORS).find_map(|anchor| {
        let href = anchor.value().attr("href")?;
        if pattern.is_match(href) || pattern.is_match(&collapsed_text(anchor)) {
            resolve_href(origin, href)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discover(html: &str, pattern: &str) -> Option<String> {
        discover_link(
            &Html::parse_document(html),
            &Regex::new(pattern).unwrap(),
            &Url::parse("https://shop.example/").unwrap(),
        )
        .map(String::from)
    }

    #[test]
    fn matches_anchor_text() {
        assert_eq!(
            discover(r#"<a href="/pages/privacy">Our Privacy Policy</a>"#, "(?i)privacy").as_deref(),
            Some("https://shop.example/pages/privacy")
        );
    }

    #[test]
    fn matches_href_and_keeps_document_order() {
        let html = r#"<a href="/pages/about">About</a>
                      <a href="/pages/faq-page">Questions</a>
                      <a href="/pages/faq">FAQ</a>"#;
        assert_eq!(
            discover(html, "(?i)faq").as_deref(),
            Some("https://shop.example/pages/faq-page")
        );
    }

    #[test]
    fn skips_unresolvable_matches() {
        let html = r#"<a href="javascript:openHelp()">Help</a><a href="/pages/help">Help</a>"#;
        assert_eq!(
            discover(html, "(?i)help").as_deref(),
            Some("https://shop.example/pages/help")
        );
    }

    #[test]
    fn no_match_is_none() {
        assert!(discover(r#"<a href="/cart">Cart</a>"#, "(?i)refund").is_none());
    }
}
