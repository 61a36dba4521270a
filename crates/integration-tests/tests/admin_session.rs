//! Back office login gate.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use foodexpress_integration_tests::TestServer;

#[tokio::test]
async fn test_admin_redirects_to_login_without_session() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .get(server.url("/admin/dashboard"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()["location"],
        "/admin/login?redirect=%2Fadmin%2Fdashboard"
    );
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .post(server.url("/admin/login"))
        .form(&[("username", "admin"), ("password", "wrong")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": false }));
}

#[tokio::test]
async fn test_login_sets_http_only_cookie_and_follows_redirect() {
    let server = TestServer::spawn().await;

    let response = server.login(Some("/admin/orders")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/admin/orders");
    let cookie = response.headers()["set-cookie"].to_str().unwrap();
    assert!(cookie.starts_with("admin_session="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_login_ignores_foreign_redirect() {
    let server = TestServer::spawn().await;

    let response = server.login(Some("https://evil.example/")).await.unwrap();

    assert_eq!(response.headers()["location"], "/admin/dashboard");
}

#[tokio::test]
async fn test_logout_revokes_access() {
    let server = TestServer::spawn().await;
    server.login(None).await.unwrap();

    let dashboard = server
        .client
        .get(server.url("/admin/dashboard"))
        .send()
        .await
        .unwrap();
    assert_eq!(dashboard.status(), StatusCode::OK);
    let body: Value = dashboard.json().await.unwrap();
    assert_eq!(body["admin"], "admin");
    assert_eq!(body["metrics"]["orders"], 2);
    assert_eq!(body["activeOrders"].as_array().unwrap().len(), 1);

    let logout = server
        .client
        .post(server.url("/admin/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(logout.status(), StatusCode::SEE_OTHER);
    assert_eq!(logout.headers()["location"], "/admin/login");

    let after = server
        .client
        .get(server.url("/admin/dashboard"))
        .send()
        .await
        .unwrap();
    assert_eq!(after.status(), StatusCode::SEE_OTHER);
}
