use super::*;

fn fixed_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-10-19T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

#[test]
fn builder_defaults_to_empty_record() {
    let record = StoreRecordBuilder::new("https://shop.example/").build(fixed_time());
    assert_eq!(record.origin, "https://shop.example/");
    assert!(record.display_name.is_none());
    assert!(record.catalog.is_empty());
    assert!(record.hero_products.is_empty());
    assert!(record.privacy_policy.is_none());
    assert!(record.return_refund_policy.is_none());
    assert!(record.faqs.is_empty());
    assert!(record.social_handles.is_empty());
    assert!(record.contact_details.is_none());
    assert!(record.about_text.is_none());
    assert!(record.important_links.is_empty());
    assert_eq!(record.fetched_at, fixed_time());
}

#[test]
fn builder_routes_policies_by_kind() {
    let mut builder = StoreRecordBuilder::new("https://shop.example/");
    builder.policy(
        PolicyKind::ReturnRefund,
        Some(Policy {
            title: "Refunds".to_string(),
            content: "30 days".to_string(),
            url: "https://shop.example/policies/refund-policy".to_string(),
        }),
    );
    let record = builder.build(fixed_time());
    assert!(record.privacy_policy.is_none());
    assert_eq!(
        record.policy(PolicyKind::ReturnRefund).map(|p| p.title.as_str()),
        Some("Refunds")
    );
}

#[test]
fn builder_drops_empty_contact_details() {
    let mut builder = StoreRecordBuilder::new("https://shop.example/");
    builder.contact_details(ContactInfo::default());
    assert!(builder.build(fixed_time()).contact_details.is_none());
}

#[test]
fn builder_keeps_non_empty_contact_details() {
    let mut contact = ContactInfo::default();
    contact.emails.insert("hello@shop.example".to_string());
    let mut builder = StoreRecordBuilder::new("https://shop.example/");
    builder.contact_details(contact.clone());
    assert_eq!(builder.build(fixed_time()).contact_details, Some(contact));
}

#[test]
fn builder_drops_empty_display_name() {
    let mut builder = StoreRecordBuilder::new("https://shop.example/");
    builder.display_name(Some(String::new()));
    assert!(builder.build(fixed_time()).display_name.is_none());
}

#[test]
fn builder_reports_content_presence() {
    let mut builder = StoreRecordBuilder::new("https://shop.example/");
    assert!(!builder.has_catalog());
    builder.hero_products(vec![ProductListing::titled("Blue Mug")]);
    assert!(!builder.has_catalog());
    builder.catalog(vec![ProductListing::titled("Red Mug")]);
    assert!(builder.has_catalog());
}

#[test]
fn policy_kind_fallback_titles() {
    assert_eq!(PolicyKind::Privacy.fallback_title(), "Privacy Policy");
    assert_eq!(
        PolicyKind::ReturnRefund.fallback_title(),
        "Return Refund Policy"
    );
}

#[test]
fn policy_kind_parses_its_own_name() {
    for kind in [PolicyKind::Privacy, PolicyKind::ReturnRefund] {
        assert_eq!(kind.as_str().parse::<PolicyKind>().unwrap(), kind);
    }
    assert!("cookie_policy".parse::<PolicyKind>().is_err());
}

#[test]
fn social_platform_parse_is_case_insensitive() {
    assert_eq!(
        "Instagram".parse::<SocialPlatform>().unwrap(),
        SocialPlatform::Instagram
    );
    assert!(matches!(
        "myspace".parse::<SocialPlatform>(),
        Err(CoreError::UnknownPlatform(ref p)) if p == "myspace"
    ));
}

#[test]
fn social_platform_serializes_lowercase() {
    let handle = SocialHandle {
        platform: SocialPlatform::Tiktok,
        url: "https://www.tiktok.com/@shop".to_string(),
        username: Some("shop".to_string()),
    };
    let json = serde_json::to_value(&handle).unwrap();
    assert_eq!(json["platform"], "tiktok");
}

#[test]
fn record_round_trips_through_json() {
    let mut builder = StoreRecordBuilder::new("https://shop.example/");
    builder
        .display_name(Some("Shop Example".to_string()))
        .faqs(vec![QaPair {
            question: "Do you ship?".to_string(),
            answer: "Worldwide.".to_string(),
        }]);
    let record = builder.build(fixed_time());
    let json = serde_json::to_string(&record).unwrap();
    let back: StoreRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn product_count_sums_both_sources() {
    let mut builder = StoreRecordBuilder::new("https://shop.example/");
    builder
        .catalog(vec![ProductListing::titled("A"), ProductListing::titled("B")])
        .hero_products(vec![ProductListing::titled("C")]);
    assert_eq!(builder.build(fixed_time()).product_count(), 3);
}
