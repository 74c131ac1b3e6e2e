use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Node, Selector};

pub(crate) static ANCHORS: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
pub(super) static CLASSED: LazyLock<Selector> = LazyLock::new(|| selector("[class]"));
pub(super) static IMAGES: LazyLock<Selector> = LazyLock::new(|| selector("img"));
pub(super) static PARAGRAPHS: LazyLock<Selector> = LazyLock::new(|| selector("p"));
pub(super) static H1: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
pub(super) static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
pub(super) static META_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| selector("meta[name='description']"));

pub(super) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid CSS selector")
}

/// True when any class token of `element` matches `pattern`.
pub(super) fn has_class_matching(element: ElementRef<'_>, pattern: &Regex) -> bool {
    element.value().classes().any(|class| pattern.is_match(class))
}

/// All text under `element` with whitespace runs collapsed to one space.
///
/// Text nodes are concatenated before collapsing, so inline markup such as
/// `<b>` adds no spacing of its own.
pub(crate) fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trimmed, non-empty text nodes under `element` in document order,
/// skipping anything inside `<script>` or `<style>`.
pub(super) fn visible_text_nodes(element: ElementRef<'_>) -> Vec<String> {
    let mut out = Vec::new();
    collect_visible(element, &mut out);
    out
}

fn collect_visible(element: ElementRef<'_>, out: &mut Vec<String>) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if !matches!(child_element.value().name(), "script" | "style") {
                collect_visible(child_element, out);
            }
        } else if let Node::Text(text) = child.value() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_owned());
            }
        }
    }
}
