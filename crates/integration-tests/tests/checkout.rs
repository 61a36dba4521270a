//! Cart and checkout flow over HTTP.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use foodexpress_integration_tests::{TestServer, checkout_body};

#[tokio::test]
async fn test_add_same_product_and_complements_merges_lines() {
    let server = TestServer::spawn().await;
    let add = json!({ "productId": "1", "complementIds": ["2"] });

    for _ in 0..2 {
        let response = server
            .client
            .post(server.url("/cart/add"))
            .json(&add)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let cart: Value = server
        .client
        .get(server.url("/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["items"][0]["quantity"], 2);
    assert_eq!(cart["itemCount"], 2);
}

#[tokio::test]
async fn test_unknown_product_leaves_cart_unchanged() {
    let server = TestServer::spawn().await;

    let body: Value = server
        .client
        .post(server.url("/cart/add"))
        .json(&json!({ "productId": "does-not-exist" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(body["line"].is_null());
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_checkout_places_order_and_clears_cart() {
    let server = TestServer::spawn().await;

    server
        .client
        .post(server.url("/cart/add"))
        .json(&json!({ "productId": "4" }))
        .send()
        .await
        .unwrap();

    let response = server
        .client
        .post(server.url("/checkout"))
        .json(&checkout_body("Centro", "Pix"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let placed: Value = response.json().await.unwrap();
    assert_eq!(placed["orderId"], "1003");
    assert!(placed["total"].is_string());

    let count: Value = server
        .client
        .get(server.url("/cart/count"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(count["count"], 0);
}

#[tokio::test]
async fn test_checkout_rejects_unknown_neighborhood() {
    let server = TestServer::spawn().await;

    server
        .client
        .post(server.url("/cart/add"))
        .json(&json!({ "productId": "4" }))
        .send()
        .await
        .unwrap();

    let response = server
        .client
        .post(server.url("/checkout"))
        .json(&checkout_body("Atlântida", "Dinheiro"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let cart_count: Value = server
        .client
        .get(server.url("/cart/count"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart_count["count"], 1);
}

#[tokio::test]
async fn test_checkout_with_empty_cart_redirects() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .post(server.url("/checkout"))
        .json(&checkout_body("Centro", "Pix"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/cart");
}
