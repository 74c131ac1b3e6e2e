//! Keyword, class-pattern and path tables that drive the field parsers.
//!
//! Everything the parsers match against lives in [`ExtractionRules`] so a
//! test can swap in a narrower table without touching parser code.

use regex::Regex;
use shopscope_core::{PolicyKind, SocialPlatform};

/// Conventional locations and the fallback anchor pattern for one topic page.
#[derive(Debug, Clone)]
pub struct TopicRule {
    /// Root-relative paths tried in order before any link discovery.
    pub known_paths: Vec<String>,
    /// Matched case-insensitively against homepage anchor text and `href`.
    pub fallback: Regex,
}

/// Domains that identify a social platform's links.
#[derive(Debug, Clone)]
pub struct PlatformRule {
    pub platform: SocialPlatform,
    pub domains: Vec<String>,
}

/// One row of the important-links table.
#[derive(Debug, Clone)]
pub struct LinkCategory {
    pub label: String,
    pub keywords: Vec<String>,
}

/// Currency code for a price symbol.
#[derive(Debug, Clone, Copy)]
pub struct CurrencySymbol {
    pub symbol: char,
    pub code: &'static str,
}

#[derive(Debug, Clone)]
pub struct ExtractionRules {
    pub privacy: TopicRule,
    pub refund: TopicRule,
    pub faq: TopicRule,

    /// Items requested per `products.json` page.
    pub catalog_page_size: u32,

    /// Platform attribution stripped from the end of `<title>`.
    pub title_suffixes: Vec<Regex>,

    pub hero_card_class: Regex,
    pub hero_title_class: Regex,
    pub hero_price_class: Regex,
    /// Group 1: optional currency symbol. Group 2: the number.
    pub price_text: Regex,
    pub currency_symbols: Vec<CurrencySymbol>,
    pub unknown_currency: String,

    pub policy_container_class: Regex,

    pub faq_container_class: Regex,
    pub faq_question_class: Regex,
    pub faq_answer_class: Regex,

    pub social_platforms: Vec<PlatformRule>,
    /// Leading path segments skipped before the username (`/company/acme`).
    pub social_profile_prefixes: Vec<String>,
    /// First path segments of share, intent and content links.
    pub social_non_profile_segments: Vec<String>,
    /// Short-link hosts whose path is content, not an account.
    pub social_non_profile_hosts: Vec<String>,

    pub email: Regex,
    pub phone: Regex,

    pub about_container_class: Regex,
    /// Paragraphs need strictly more words than this to count as prose.
    pub about_min_words: usize,

    pub link_categories: Vec<LinkCategory>,
}

impl ExtractionRules {
    /// The known-path/fallback rule for a policy kind.
    #[must_use]
    pub fn policy_rule(&self, kind: PolicyKind) -> &TopicRule {
        match kind {
            PolicyKind::Privacy => &self.privacy,
            PolicyKind::ReturnRefund => &self.refund,
        }
    }

    /// Currency code for `symbol`, or the unknown marker.
    #[must_use]
    pub fn currency_for(&self, symbol: Option<char>) -> String {
        symbol
            .and_then(|s| self.currency_symbols.iter().find(|c| c.symbol == s))
            .map_or_else(|| self.unknown_currency.clone(), |c| c.code.to_owned())
    }
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            privacy: topic(
                &["/policies/privacy-policy", "/pages/privacy-policy"],
                "privacy-policy|privacy",
            ),
            refund: topic(
                &[
                    "/policies/refund-policy",
                    "/policies/returns-policy",
                    "/pages/return-policy",
                ],
                "refund-policy|return-policy|returns",
            ),
            faq: topic(
                &["/pages/faqs", "/community/faq", "/apps/help-center/faq"],
                "faq|frequently-asked-questions|help",
            ),

            catalog_page_size: 250,

            title_suffixes: vec![
                pattern(r"(?i)\s*\|\s*Shopify.*$"),
                pattern(r"(?i)\s*-\s*Powered by Shopify.*$"),
            ],

            hero_card_class: pattern("product-card|product-item|featured-product"),
            hero_title_class: pattern("product-card__title|product-item__title|product-title"),
            hero_price_class: pattern("price-item|product-card__price"),
            price_text: pattern(r"([£$€₹])?\s*(\d[\d,.]*)"),
            currency_symbols: vec![
                CurrencySymbol { symbol: '$', code: "USD" },
                CurrencySymbol { symbol: '€', code: "EUR" },
                CurrencySymbol { symbol: '£', code: "GBP" },
                CurrencySymbol { symbol: '₹', code: "INR" },
            ],
            unknown_currency: "Unknown".to_owned(),

            policy_container_class: pattern("rte|policy-content|page-content"),

            faq_container_class: pattern("faq-section|accordion|faq-list"),
            faq_question_class: pattern("faq-question|accordion-header|question"),
            faq_answer_class: pattern("faq-answer|accordion-content|answer"),

            social_platforms: vec![
                platform(SocialPlatform::Facebook, &["facebook.com", "fb.me"]),
                platform(SocialPlatform::Instagram, &["instagram.com"]),
                platform(SocialPlatform::Twitter, &["twitter.com", "x.com"]),
                platform(SocialPlatform::Linkedin, &["linkedin.com"]),
                platform(SocialPlatform::Youtube, &["youtube.com", "youtu.be"]),
                platform(SocialPlatform::Pinterest, &["pinterest.com"]),
                platform(SocialPlatform::Tiktok, &["tiktok.com"]),
            ],
            social_profile_prefixes: strings(&["company", "in", "c", "channel", "user", "pages"]),
            social_non_profile_segments: strings(&[
                "share",
                "sharer",
                "sharer.php",
                "intent",
                "dialog",
                "sharearticle",
                "pin",
                "watch",
                "hashtag",
            ]),
            social_non_profile_hosts: strings(&["youtu.be"]),

            email: pattern(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"),
            phone: pattern(r"(?:\+?(\d{1,3}))?[-. (]*(\d{3})[-. )]*(\d{3})[-. ]*(\d{4})(?: *x(\d+))?"),

            about_container_class: pattern("main-content|content|section|about"),
            about_min_words: 20,

            link_categories: vec![
                category("Order tracking", &["track order", "order status", "my orders"]),
                category("Contact Us", &["contact", "support", "help center"]),
                category("Blogs", &["blog", "news"]),
                category("Shipping", &["shipping", "delivery"]),
                category("Careers", &["careers", "jobs"]),
                category("Terms of Service", &["terms of service", "terms & conditions"]),
                category("Privacy Policy", &["privacy policy"]),
                category("Refund Policy", &["refund policy", "return policy"]),
            ],
        }
    }
}

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("valid extraction rule regex")
}

fn topic(paths: &[&str], fallback: &str) -> TopicRule {
    TopicRule {
        known_paths: strings(paths),
        fallback: pattern(&format!("(?i){fallback}")),
    }
}

fn platform(platform: SocialPlatform, domains: &[&str]) -> PlatformRule {
    PlatformRule {
        platform,
        domains: strings(domains),
    }
}

fn category(label: &str, keywords: &[&str]) -> LinkCategory {
    LinkCategory {
        label: label.to_owned(),
        keywords: strings(keywords),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}
