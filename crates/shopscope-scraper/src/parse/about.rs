use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::dom::{collapsed_text, has_class_matching, selector, META_DESCRIPTION, PARAGRAPHS};
use crate::rules::ExtractionRules;

static CONTENT_AREAS: LazyLock<Selector> = LazyLock::new(|| selector("div, article, main"));

/// Brand prose: the meta description followed by long paragraphs from
/// content areas, separated by blank lines.
///
/// A paragraph inside several matching containers is used once.
#[must_use]
pub fn parse_about_text(document: &Html, rules: &ExtractionRules) -> Option<String> {
    let mut seen = HashSet::new();
    let mut parts = Vec::new();

    if let Some(description) = document
        .select(&META_DESCRIPTION)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        parts.push(description.to_owned());
    }

    let areas = document
        .select(&CONTENT_AREAS)
        .filter(|el| has_class_matching(*el, &rules.about_container_class));
    for area in areas {
        for paragraph in area.select(&PARAGRAPHS) {
            if !seen.insert(paragraph.id()) {
                continue;
            }
            let text = collapsed_text(paragraph);
            if text.split_whitespace().count() > rules.about_min_words {
                parts.push(text);
            }
        }
    }

    (!parts.is_empty()).then(|| parts.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG: &str = "We started roasting coffee in a garage in 2014 because we could not \
                        find beans that tasted the way we remembered from our travels abroad.";

    fn parse(html: &str) -> Option<String> {
        parse_about_text(&Html::parse_document(html), &ExtractionRules::default())
    }

    #[test]
    fn keeps_long_paragraphs_after_meta_description() {
        let html = format!(
            r#"<head><meta name="description" content=" Small-batch coffee. "></head>
               <body><div class="main-content">
                 <p>Too short to count.</p>
                 <p>{LONG}</p>
               </div></body>"#
        );
        assert_eq!(parse(&html), Some(format!("Small-batch coffee.\n\n{LONG}")));
    }

    #[test]
    fn nested_containers_do_not_repeat_paragraphs() {
        let html = format!(
            r#"<main class="content"><div class="section about"><p>{LONG}</p></div></main>"#
        );
        assert_eq!(parse(&html).as_deref(), Some(LONG));
    }

    #[test]
    fn paragraphs_outside_content_areas_are_ignored() {
        let html = format!("<div class=\"footer\"><p>{LONG}</p></div>");
        assert!(parse(&html).is_none());
    }
}
