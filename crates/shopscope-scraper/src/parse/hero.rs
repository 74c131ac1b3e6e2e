use std::collections::HashSet;

use scraper::{ElementRef, Html};
use shopscope_core::ProductListing;
use url::Url;

use super::dom::{collapsed_text, has_class_matching, ANCHORS, CLASSED, IMAGES};
use crate::client::resolve_href;
use crate::rules::ExtractionRules;

/// Product cards rendered on the homepage.
///
/// A card is an element with a class token matching the card pattern, not
/// counting BEM element tokens (`product-card__title`). When cards nest,
/// only the innermost one is read. Cards without a title are dropped.
#[must_use]
pub fn parse_hero_products(
    document: &Html,
    origin: &Url,
    rules: &ExtractionRules,
) -> Vec<ProductListing> {
    let cards: Vec<ElementRef<'_>> = document
        .select(&CLASSED)
        .filter(|el| {
            el.value()
                .classes()
                .any(|class| !class.contains("__") && rules.hero_card_class.is_match(class))
        })
        .collect();

    let has_nested_card: HashSet<_> = cards
        .iter()
        .flat_map(|card| card.ancestors().map(|a| a.id()))
        .collect();

    cards
        .into_iter()
        .filter(|card| !has_nested_card.contains(&card.id()))
        .filter_map(|card| read_card(card, origin, rules))
        .collect()
}

fn read_card(card: ElementRef<'_>, origin: &Url, rules: &ExtractionRules) -> Option<ProductListing> {
    let title = first_with_class(card, &rules.hero_title_class)
        .map(collapsed_text)
        .filter(|t| !t.is_empty())?;

    let (price, currency) = first_with_class(card, &rules.hero_price_class)
        .map(collapsed_text)
        .and_then(|text| parse_price_text(&text, rules))
        .map_or((None, None), |(price, currency)| (Some(price), Some(currency)));

    let image_url = card
        .select(&IMAGES)
        .next()
        .and_then(|img| img.value().attr("src").or_else(|| img.value().attr("data-src")))
        .and_then(|src| resolve_href(origin, src))
        .map(String::from);

    let product_url = card
        .select(&ANCHORS)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| resolve_href(origin, href))
        .map(String::from);

    Some(ProductListing {
        price,
        currency,
        image_url,
        product_url,
        ..ProductListing::titled(title)
    })
}

fn first_with_class<'a>(card: ElementRef<'a>, pattern: &regex::Regex) -> Option<ElementRef<'a>> {
    card.select(&CLASSED)
        .find(|el| has_class_matching(*el, pattern))
}

/// Splits display price text into `(amount, currency)`.
///
/// Thousands separators are removed from the amount. A missing or
/// unrecognized symbol yields the rules' unknown-currency marker.
#[must_use]
pub fn parse_price_text(text: &str, rules: &ExtractionRules) -> Option<(String, String)> {
    let caps = rules.price_text.captures(text)?;
    let amount = caps.get(2)?.as_str().replace(',', "");
    let symbol = caps.get(1).and_then(|m| m.as_str().chars().next());
    Some((amount, rules.currency_for(symbol)))
}

#[cfg(test)]
#[path = "hero_test.rs"]
mod tests;
