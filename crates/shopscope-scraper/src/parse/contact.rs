use scraper::Html;
use shopscope_core::ContactInfo;

use super::dom::visible_text_nodes;
use crate::rules::ExtractionRules;

/// Emails and phone numbers anywhere in the visible page text.
///
/// A phone number is stored as its captured digit groups concatenated.
#[must_use]
pub fn parse_contact_details(document: &Html, rules: &ExtractionRules) -> ContactInfo {
    let text = visible_text_nodes(document.root_element()).join(" ");

    let emails = rules
        .email
        .find_iter(&text)
        .map(|m| m.as_str().to_owned())
        .collect();

    let phone_numbers = rules
        .phone
        .captures_iter(&text)
        .map(|caps| {
            caps.iter()
                .skip(1)
                .flatten()
                .map(|group| group.as_str())
                .collect::<String>()
        })
        .collect();

    ContactInfo {
        emails,
        phone_numbers,
    }
}
