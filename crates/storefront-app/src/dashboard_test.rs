use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn order_json(id: &str, status: &str, total: f64) -> serde_json::Value {
    json!({
        "_id": id,
        "customerName": "Ada Lovelace",
        "customerEmail": "ada@example.com",
        "items": [
            { "productId": 1, "productName": "Mug", "price": total, "quantity": 1 }
        ],
        "totalAmount": total,
        "status": status,
        "createdAt": "2025-03-01T12:00:00Z"
    })
}

async fn mount_orders(server: &MockServer, orders: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/orders/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(orders))
        .mount(server)
        .await;
}

async fn order_fetches(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/api/orders/all")
        .count()
}

fn dashboard_for(server: &MockServer, interval: Duration) -> Dashboard {
    let client = StorefrontClient::new(&server.uri(), Some(Duration::from_secs(5)), "test")
        .expect("client construction should not fail");
    Dashboard::new(client, interval)
}

async fn wait_until_loaded(dashboard: &Dashboard) {
    let mut rx = dashboard.subscribe();
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|b| !b.is_loading()))
        .await
        .expect("board should load")
        .expect("sender should be alive");
}

#[tokio::test]
async fn stats_are_computed_from_fetched_orders() {
    let server = MockServer::start().await;
    mount_orders(
        &server,
        json!([
            order_json("aaaaaa000001", "pending", 20.0),
            order_json("aaaaaa000002", "shipped", 30.0)
        ]),
    )
    .await;

    let dashboard = dashboard_for(&server, Duration::from_secs(5));
    assert!(dashboard.stats().is_none(), "no stats while loading");

    dashboard.refresh().await.expect("refresh should succeed");

    let stats = dashboard.stats().expect("stats after load");
    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.pending_orders, 1);
    assert_eq!(stats.revenue, Decimal::from(50));
}

#[tokio::test]
async fn failed_fetch_leaves_loading_state_and_keeps_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            order_json("aaaaaa000001", "pending", 20.0)
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/all"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dashboard = dashboard_for(&server, Duration::from_secs(5));
    dashboard.refresh().await.unwrap();
    assert!(dashboard.refresh().await.is_err());

    let board = dashboard.board();
    assert!(!board.is_loading());
    assert_eq!(board.orders().len(), 1);
}

#[tokio::test]
async fn failed_first_fetch_still_finishes_loading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/all"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let dashboard = dashboard_for(&server, Duration::from_secs(5));
    assert!(dashboard.refresh().await.is_err());

    let stats = dashboard.stats().expect("loading ends even on failure");
    assert_eq!(stats.total_orders, 0);
}

#[tokio::test]
async fn mount_fetches_immediately_and_keeps_polling() {
    let server = MockServer::start().await;
    mount_orders(&server, json!([])).await;

    let mut dashboard = dashboard_for(&server, Duration::from_millis(50));
    dashboard.mount();
    assert!(dashboard.is_mounted());
    wait_until_loaded(&dashboard).await;

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(order_fetches(&server).await >= 3);

    dashboard.unmount().await;
}

#[tokio::test]
async fn unmount_halts_polling() {
    let server = MockServer::start().await;
    mount_orders(&server, json!([])).await;

    let mut dashboard = dashboard_for(&server, Duration::from_millis(50));
    dashboard.mount();
    wait_until_loaded(&dashboard).await;

    dashboard.unmount().await;
    assert!(!dashboard.is_mounted());
    tokio::time::sleep(Duration::from_millis(50)).await;
    let after_stop = order_fetches(&server).await;

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(order_fetches(&server).await, after_stop);
    assert!(dashboard.board().is_loading(), "remount starts from loading");
}

#[tokio::test]
async fn status_update_is_followed_by_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/orders/aaaaaa000001/status"))
        .and(body_json(json!({ "status": "shipped" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    mount_orders(&server, json!([order_json("aaaaaa000001", "shipped", 20.0)])).await;

    let dashboard = dashboard_for(&server, Duration::from_secs(5));
    dashboard
        .update_status("aaaaaa000001", OrderStatus::Shipped)
        .await
        .expect("update should succeed");

    let requests = server.received_requests().await.unwrap();
    let methods: Vec<String> = requests.iter().map(|r| r.method.to_string()).collect();
    assert_eq!(methods, vec!["PUT", "GET"]);
    assert_eq!(
        dashboard.board().get("aaaaaa000001").unwrap().status,
        OrderStatus::Shipped
    );
}

#[tokio::test]
async fn failed_status_update_does_not_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/orders/aaaaaa000001/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_orders(&server, json!([])).await;

    let dashboard = dashboard_for(&server, Duration::from_secs(5));
    let result = dashboard
        .update_status("aaaaaa000001", OrderStatus::Delivered)
        .await;

    assert!(matches!(result, Err(ClientError::Rejected { status: 500, .. })));
    assert_eq!(order_fetches(&server).await, 0);
}

#[tokio::test]
async fn select_and_close_detail_do_not_refetch() {
    let server = MockServer::start().await;
    mount_orders(
        &server,
        json!([order_json("65a1b2c3d4e5f6a7b8c9d0e1", "pending", 12.5)]),
    )
    .await;

    let mut dashboard = dashboard_for(&server, Duration::from_secs(5));
    dashboard.refresh().await.unwrap();
    let fetches = order_fetches(&server).await;

    assert!(dashboard.select("c9d0e1"), "short reference should resolve");
    let selected = dashboard.selected_order().expect("order selected");
    assert_eq!(selected.id, "65a1b2c3d4e5f6a7b8c9d0e1");
    assert_eq!(selected.items.len(), 1);

    dashboard.close_detail();
    assert!(dashboard.selected_order().is_none());
    assert_eq!(order_fetches(&server).await, fetches);
}

#[tokio::test]
async fn select_unknown_order_returns_false() {
    let server = MockServer::start().await;
    mount_orders(&server, json!([])).await;

    let mut dashboard = dashboard_for(&server, Duration::from_secs(5));
    dashboard.refresh().await.unwrap();

    assert!(!dashboard.select("nope"));
    assert!(dashboard.selected_order().is_none());
}

#[test]
fn resolve_rejects_ambiguous_short_refs() {
    let orders: Vec<Order> = vec![
        serde_json::from_value(order_json("111111abcdef", "pending", 1.0)).unwrap(),
        serde_json::from_value(order_json("222222abcdef", "pending", 1.0)).unwrap(),
    ];
    let board = OrderBoard {
        loaded: true,
        orders,
    };
    assert!(board.resolve("ABCDEF").is_none());
    assert!(board.resolve("111111abcdef").is_some());
}
