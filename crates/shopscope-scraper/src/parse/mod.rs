//! Field parsers.
//!
//! Each parser is a pure function of one document (or one catalog JSON page)
//! and the [`crate::ExtractionRules`]. Missing structure yields an empty or
//! absent value; no parser returns an error.

mod about;
mod catalog;
mod contact;
mod dom;
mod faq;
mod hero;
mod links;
mod policy;
mod social;
mod title;

pub use about::parse_about_text;
pub use catalog::{catalog_item_count, parse_catalog};
pub use contact::parse_contact_details;
pub use faq::parse_faqs;
pub use hero::{parse_hero_products, parse_price_text};
pub use links::parse_important_links;
pub use policy::parse_policy;
pub use social::{parse_social_handles, social_username};
pub use title::parse_display_name;

pub(crate) use dom::collapsed_text;
pub(crate) use dom::ANCHORS;
