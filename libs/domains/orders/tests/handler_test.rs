//! Handler tests for the Orders domain

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_orders::{InMemoryOrderRepository, OrderService, handlers};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/orders")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_submit_order_stores_payload_verbatim() {
    let repo = InMemoryOrderRepository::new();
    let app = handlers::router(OrderService::new(repo.clone()));

    let order = json!({
        "email": "a@x.com",
        "items": [{"productId": "65a1f0c2e4b0a1b2c3d4e5f6", "qty": 2}],
        "total": 24.5
    });

    let response = app
        .oneshot(post_json(&order.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["acknowledged"], true);
    let inserted_id = body["insertedId"].as_str().unwrap().to_string();
    assert_eq!(inserted_id.len(), 24);

    let stored = repo.orders().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["email"], "a@x.com");
    assert_eq!(stored[0]["items"], order["items"]);
    assert_eq!(stored[0]["_id"], json!(inserted_id));
}

#[tokio::test]
async fn test_submit_order_accepts_empty_object() {
    let app = handlers::router(OrderService::new(InMemoryOrderRepository::new()));

    let response = app.oneshot(post_json("{}")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_submit_order_rejects_non_object() {
    let app = handlers::router(OrderService::new(InMemoryOrderRepository::new()));

    let response = app.oneshot(post_json("[1, 2, 3]")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_submit_order_rejects_malformed_json() {
    let app = handlers::router(OrderService::new(InMemoryOrderRepository::new()));

    let response = app.oneshot(post_json("{\"items\": ")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_order_duplicate_id_conflicts() {
    let app = handlers::router(OrderService::new(InMemoryOrderRepository::new()));

    let response = app
        .clone()
        .oneshot(post_json(r#"{"_id": "order-1"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["insertedId"], "order-1");

    let response = app
        .oneshot(post_json(r#"{"_id": "order-1"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
