//! Integration tests for `StorefrontClient` using wiremock HTTP mocks.

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_client::{ClientError, StorefrontClient};
use storefront_core::{Cart, OrderRequest, OrderStatus, ProductId};

fn test_client(base_url: &str) -> StorefrontClient {
    StorefrontClient::new(base_url, Some(Duration::from_secs(5)), "storefront-test/0.1")
        .expect("client construction should not fail")
}

fn order_json(id: &str, status: &str, total: f64) -> serde_json::Value {
    json!({
        "_id": id,
        "customerName": "Grace Hopper",
        "customerEmail": "grace@example.com",
        "items": [
            { "productId": 1, "productName": "Mug", "price": 10.0, "quantity": 2 }
        ],
        "totalAmount": total,
        "status": status,
        "createdAt": "2025-05-04T09:30:00.000Z"
    })
}

#[tokio::test]
async fn list_products_returns_parsed_catalog() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Mug", "price": 10, "category": "Kitchen" },
            {
                "id": 2,
                "name": "Poster",
                "price": 12.49,
                "category": "Decor",
                "description": "A1 print",
                "image": "https://cdn.example.com/poster.jpg"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let products = client.list_products().await.expect("should parse products");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, ProductId::Number(1));
    assert_eq!(products[0].price, Decimal::from(10));
    assert_eq!(products[1].price, Decimal::from_str("12.49").unwrap());
    assert_eq!(products[1].description.as_deref(), Some("A1 print"));
}

#[tokio::test]
async fn list_products_maps_server_error_to_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.list_products().await.unwrap_err();

    assert!(
        matches!(err, ClientError::Rejected { status: 500, message: None, .. }),
        "expected Rejected(500), got: {err:?}"
    );
}

#[tokio::test]
async fn list_products_reports_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "products": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.list_products().await.unwrap_err();

    assert!(
        matches!(err, ClientError::Deserialize { ref context, .. } if context == "list products"),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn list_orders_parses_orders() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            order_json("665f00000000000000abc123", "pending", 20.0),
            order_json("665f00000000000000def456", "shipped", 30.0)
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let orders = client.list_orders().await.expect("should parse orders");

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, "665f00000000000000abc123");
    assert_eq!(orders[0].status, OrderStatus::Pending);
    assert_eq!(orders[1].status, OrderStatus::Shipped);
    assert_eq!(orders[0].items[0].quantity, 2);
}

#[tokio::test]
async fn checkout_posts_camel_case_body_and_returns_order_id() {
    let server = MockServer::start().await;

    let mut cart = Cart::new();
    let product = storefront_core::Product {
        id: ProductId::Number(1),
        name: "Mug".to_string(),
        price: Decimal::from(10),
        category: "Kitchen".to_string(),
        description: None,
        image: None,
    };
    cart.add(&product);
    let request = OrderRequest::from_cart("Grace Hopper", "grace@example.com", &cart);

    Mock::given(method("POST"))
        .and(path("/api/orders/checkout"))
        .and(body_json(json!({
            "customerName": "Grace Hopper",
            "customerEmail": "grace@example.com",
            "items": [
                { "productId": 1, "productName": "Mug", "price": 10.0, "quantity": 1 }
            ],
            "totalAmount": 10.0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "orderId": "abc123" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let order_id = client.checkout(&request).await.expect("checkout should succeed");

    assert_eq!(order_id, "abc123");
}

#[tokio::test]
async fn checkout_rejection_carries_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders/checkout"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid email" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let request = OrderRequest::from_cart("A", "not-an-email", &Cart::new());
    let err = client.checkout(&request).await.unwrap_err();

    assert!(
        matches!(err, ClientError::Rejected { status: 400, message: Some(ref m), .. } if m == "Invalid email"),
        "expected Rejected with message, got: {err:?}"
    );
}

#[tokio::test]
async fn update_order_status_puts_status_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/orders/665f00000000000000abc123/status"))
        .and(body_json(json!({ "status": "shipped" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .update_order_status("665f00000000000000abc123", OrderStatus::Shipped)
        .await
        .expect("status update should succeed");
}

#[tokio::test]
async fn update_order_status_not_found_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/orders/missing/status"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Order not found" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .update_order_status("missing", OrderStatus::Delivered)
        .await
        .unwrap_err();

    assert!(
        matches!(err, ClientError::Rejected { status: 404, message: Some(ref m), .. } if m == "Order not found"),
        "expected Rejected(404), got: {err:?}"
    );
}

#[tokio::test]
async fn unreachable_server_is_http_error() {
    let client = test_client("http://127.0.0.1:1");
    let err = client.list_orders().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)), "got: {err:?}");
}
