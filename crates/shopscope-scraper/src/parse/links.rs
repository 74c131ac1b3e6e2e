use std::collections::HashSet;

use scraper::Html;
use shopscope_core::ImportantLink;
use url::Url;

use super::dom::{collapsed_text, ANCHORS};
use crate::client::resolve_href;
use crate::rules::{ExtractionRules, LinkCategory};

/// Same-origin navigation links sorted into the rules' categories.
///
/// An anchor belongs to the first category with a keyword in its text, or
/// with the hyphenated keyword in its URL. Unique by URL; the label is the
/// anchor text, or the category label when the anchor has no text.
#[must_use]
pub fn parse_important_links(
    document: &Html,
    origin: &Url,
    rules: &ExtractionRules,
) -> Vec<ImportantLink> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&ANCHORS) {
        let Some(url) = anchor
            .value()
            .attr("href")
            .and_then(|href| resolve_href(origin, href))
        else {
            continue;
        };
        if url.host_str() != origin.host_str()
            || url.port_or_known_default() != origin.port_or_known_default()
        {
            continue;
        }

        let text = collapsed_text(anchor);
        let Some(category) = categorize(&text, &url, &rules.link_categories) else {
            continue;
        };
        if !seen.insert(url.to_string()) {
            continue;
        }

        let label = if text.is_empty() {
            category.label.clone()
        } else {
            text
        };
        links.push(ImportantLink {
            label,
            url: url.into(),
        });
    }

    links
}

fn categorize<'r>(text: &str, url: &Url, categories: &'r [LinkCategory]) -> Option<&'r LinkCategory> {
    let text = text.to_lowercase();
    let url = url.as_str().to_lowercase();
    categories.iter().find(|category| {
        category.keywords.iter().any(|keyword| {
            let keyword = keyword.to_lowercase();
            text.contains(&keyword) || url.contains(&keyword.replace(' ', "-"))
        })
    })
}
