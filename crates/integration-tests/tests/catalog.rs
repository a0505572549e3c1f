//! Product catalog: listing, filters, caching, and missing products.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use embermart_client::ClientError;
use embermart_client::api::types::ProductQuery;
use embermart_core::ProductId;
use embermart_integration_tests::{TestStack, error_body, product_body, product_page_body};

#[tokio::test]
async fn test_list_products_parses_listing_page() {
    let stack = TestStack::start().await;
    stack.login("tok-123").await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_page_body(vec![
            product_body(1, "ABC Dry Chemical Extinguisher 6kg", 5000, 12),
            product_body(2, "Smoke Detector", 1500, 30),
        ])))
        .mount(&stack.server)
        .await;

    let page = stack
        .api
        .list_products(&ProductQuery::default())
        .await
        .expect("listing succeeds");
    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 2);
    assert_eq!(
        page.items.first().expect("first item").unit_price().display(),
        "$5,000"
    );
}

#[tokio::test]
async fn test_filtered_listing_sends_query_params() {
    let stack = TestStack::start().await;
    stack.login("tok-123").await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("category", "alarms"))
        .and(query_param("available", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(product_page_body(vec![product_body(7, "Heat Alarm", 900, 4)])),
        )
        .expect(1)
        .mount(&stack.server)
        .await;

    let query = ProductQuery {
        category: Some("alarms".to_string()),
        available: Some(true),
        ..ProductQuery::default()
    };
    let page = stack.api.list_products(&query).await.expect("filtered listing");
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn test_default_listing_is_served_from_cache() {
    let stack = TestStack::start().await;
    stack.login("tok-123").await;

    // expect(1): the second call must not reach the backend.
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(product_page_body(vec![product_body(1, "Fire Blanket", 750, 5)])),
        )
        .expect(1)
        .mount(&stack.server)
        .await;

    let first = stack
        .api
        .list_products(&ProductQuery::default())
        .await
        .expect("first listing");
    let second = stack
        .api
        .list_products(&ProductQuery::default())
        .await
        .expect("cached listing");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_invalidate_catalog_forces_refetch() {
    let stack = TestStack::start().await;
    stack.login("tok-123").await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(product_page_body(vec![product_body(1, "Fire Blanket", 750, 5)])),
        )
        .expect(2)
        .mount(&stack.server)
        .await;

    stack
        .api
        .list_products(&ProductQuery::default())
        .await
        .expect("first listing");
    stack.api.invalidate_catalog().await;
    stack
        .api
        .list_products(&ProductQuery::default())
        .await
        .expect("refetched listing");
}

#[tokio::test]
async fn test_missing_product_maps_to_not_found() {
    let stack = TestStack::start().await;
    stack.login("tok-123").await;

    Mock::given(method("GET"))
        .and(path("/api/products/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_body("No such product")))
        .mount(&stack.server)
        .await;

    let err = stack
        .api
        .get_product(ProductId::new(99))
        .await
        .expect_err("missing product");
    assert!(matches!(err, ClientError::NotFound(_)));
    assert_eq!(err.user_message(), "Product 99 was not found.");
}
