use std::sync::LazyLock;

use scraper::{Html, Selector};
use shopscope_core::{Policy, PolicyKind};
use url::Url;

use super::dom::{collapsed_text, has_class_matching, selector, visible_text_nodes, H1};
use crate::rules::ExtractionRules;

static DIVS: LazyLock<Selector> = LazyLock::new(|| selector("div"));
static ARTICLE: LazyLock<Selector> = LazyLock::new(|| selector("article"));
static MAIN: LazyLock<Selector> = LazyLock::new(|| selector("main"));

/// Reads a policy page.
///
/// Content comes from the first `div` with a content-area class, else the
/// first `<article>`, else `<main>`; its text nodes are joined by newlines.
/// `page_url` is stored verbatim as the policy's `url`.
#[must_use]
pub fn parse_policy(
    document: &Html,
    kind: PolicyKind,
    page_url: &Url,
    rules: &ExtractionRules,
) -> Option<Policy> {
    let container = document
        .select(&DIVS)
        .find(|div| has_class_matching(*div, &rules.policy_container_class))
        .or_else(|| document.select(&ARTICLE).next())
        .or_else(|| document.select(&MAIN).next())?;

    let content = visible_text_nodes(container).join("\n");
    if content.is_empty() {
        return None;
    }

    let title = document
        .select(&H1)
        .next()
        .map(collapsed_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| kind.fallback_title());

    Some(Policy {
        title,
        content,
        url: page_url.to_string(),
    })
}
