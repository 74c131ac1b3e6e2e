//! End-to-end extraction against a `wiremock` storefront.
//!
//! Routes that are not mounted answer 404, which the client reports as an
//! absent page, so each test mounts only what the store "has".

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopscope_core::{InMemoryStoreRepository, SocialPlatform, StoreRepository};
use shopscope_scraper::{ExtractionRules, Extractor, ScraperError, StorefrontClient};

fn extractor() -> Extractor<StorefrontClient> {
    let client = StorefrontClient::new(5, 5, "shopscope-test/0.1").expect("test client");
    Extractor::new(client, ExtractionRules::default(), 4)
}

const HOMEPAGE: &str = r#"<!doctype html>
<html>
  <head>
    <title>Cool Mugs - Powered by Shopify</title>
    <meta name="description" content="Handmade mugs from Portland.">
  </head>
  <body>
    <nav>
      <a href="/pages/privacy">Our Privacy Policy</a>
      <a href="/pages/shipping-info">Shipping</a>
      <a href="https://www.instagram.com/coolmugs/">Instagram</a>
      <a href="https://www.facebook.com/sharer/sharer.php?u=mugs">Share</a>
    </nav>
    <div class="product-card">
      <a href="/products/blue-mug"><img src="/img/blue.jpg"></a>
      <h3 class="product-card__title">Blue Mug</h3>
      <span class="price-item price-item--regular">$ 29.99</span>
    </div>
    <footer><p>Questions? Email hello@coolmugs.example or call 555-123-4567.</p></footer>
  </body>
</html>"#;

async fn mount_store(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": [{
            "title": "Red Mug",
            "handle": "red-mug",
            "variants": [{"price": "12.00"}],
            "images": [{"src": "/img/mug.jpg"}]
        }]})))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(HOMEPAGE))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pages/privacy"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<h1>Privacy</h1><div class="rte"><p>We keep your data safe.</p></div>"#,
        ))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn extracts_a_full_record() {
    let server = MockServer::start().await;
    mount_store(&server).await;
    let origin = format!("{}/", server.uri());

    let record = extractor().extract(&server.uri()).await.unwrap();

    assert_eq!(record.origin, origin);
    assert_eq!(record.display_name.as_deref(), Some("Cool Mugs"));

    assert_eq!(record.catalog.len(), 1);
    assert_eq!(
        record.catalog[0].image_url.as_deref(),
        Some(format!("{origin}img/mug.jpg").as_str())
    );

    assert_eq!(record.hero_products.len(), 1);
    assert_eq!(record.hero_products[0].title, "Blue Mug");
    assert_eq!(record.hero_products[0].currency.as_deref(), Some("USD"));

    let privacy = record.privacy_policy.as_ref().unwrap();
    assert_eq!(privacy.url, format!("{origin}pages/privacy"));
    assert_eq!(privacy.content, "We keep your data safe.");
    assert!(record.return_refund_policy.is_none());
    assert!(record.faqs.is_empty());

    let platforms: Vec<_> = record.social_handles.iter().map(|h| h.platform).collect();
    assert_eq!(platforms, vec![SocialPlatform::Instagram, SocialPlatform::Facebook]);
    assert_eq!(record.social_handles[0].username.as_deref(), Some("coolmugs"));
    assert!(record.social_handles[1].username.is_none());

    let contact = record.contact_details.as_ref().unwrap();
    assert!(contact.emails.contains("hello@coolmugs.example"));
    assert!(contact.phone_numbers.contains("5551234567"));

    let labels: Vec<_> = record.important_links.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, vec!["Our Privacy Policy", "Shipping"]);

    assert_eq!(record.about_text.as_deref(), Some("Handmade mugs from Portland."));
}

#[tokio::test]
async fn extract_and_save_replaces_the_stored_record() {
    let server = MockServer::start().await;
    mount_store(&server).await;
    let repo = InMemoryStoreRepository::new();

    let record = extractor()
        .extract_and_save(&server.uri(), &repo)
        .await
        .unwrap();

    let stored = repo.load(&record.origin).await.unwrap();
    assert_eq!(stored, Some(record));
}

#[tokio::test]
async fn empty_store_is_not_found() {
    let server = MockServer::start().await;

    let err = extractor().extract(&server.uri()).await.unwrap_err();

    assert!(
        matches!(err, ScraperError::NotFound { .. }),
        "expected NotFound, got: {err:?}"
    );
}
