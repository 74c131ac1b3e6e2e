use std::collections::HashSet;

use scraper::Html;
use shopscope_core::SocialHandle;
use url::Url;

use super::dom::ANCHORS;
use crate::client::resolve_href;
use crate::rules::{ExtractionRules, PlatformRule};

/// Links to the store's social profiles, unique by resolved URL.
///
/// Each anchor is assigned the first platform in the table whose domain
/// matches its host.
#[must_use]
pub fn parse_social_handles(
    document: &Html,
    origin: &Url,
    rules: &ExtractionRules,
) -> Vec<SocialHandle> {
    let mut seen = HashSet::new();
    let mut handles = Vec::new();

    for anchor in document.select(&ANCHORS) {
        let Some(url) = anchor
            .value()
            .attr("href")
            .and_then(|href| resolve_href(origin, href))
        else {
            continue;
        };
        let Some(rule) = rules.social_platforms.iter().find(|rule| on_platform(rule, &url)) else {
            continue;
        };
        if !seen.insert(url.to_string()) {
            continue;
        }

        handles.push(SocialHandle {
            platform: rule.platform,
            username: social_username(&url, rules),
            url: url.into(),
        });
    }

    handles
}

fn on_platform(rule: &PlatformRule, url: &Url) -> bool {
    let host = url.host_str().unwrap_or_default();
    rule.domains.iter().any(|domain| {
        host == domain
            || host
                .strip_suffix(domain.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// The account name in a profile URL, if the URL points at a profile.
///
/// `instagram.com/brand`, `youtube.com/@brand` and
/// `linkedin.com/company/brand` all yield `brand`. Share, intent and
/// content links yield `None`.
#[must_use]
pub fn social_username(url: &Url, rules: &ExtractionRules) -> Option<String> {
    let host = url.host_str()?.trim_start_matches("www.");
    if rules.social_non_profile_hosts.iter().any(|h| h == host) {
        return None;
    }

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let mut segment = segments.next()?;
    let lowered = segment.to_ascii_lowercase();
    if rules.social_non_profile_segments.contains(&lowered) {
        return None;
    }
    if rules.social_profile_prefixes.contains(&lowered) {
        segment = segments.next()?;
    }

    let name = segment.trim_start_matches('@');
    (!name.is_empty()).then(|| name.to_owned())
}
