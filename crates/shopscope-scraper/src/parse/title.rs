use scraper::Html;

use super::dom::{collapsed_text, TITLE};
use crate::rules::ExtractionRules;

/// Store name from `<title>`, minus platform attribution suffixes.
#[must_use]
pub fn parse_display_name(document: &Html, rules: &ExtractionRules) -> Option<String> {
    let raw = collapsed_text(document.select(&TITLE).next()?);
    let stripped = rules
        .title_suffixes
        .iter()
        .fold(raw, |name, suffix| suffix.replace(&name, "").into_owned());
    let name = stripped.trim();
    (!name.is_empty()).then(|| name.to_owned())
}
