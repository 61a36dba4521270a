//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (blob store reachable)
//!
//! # Menu
//! GET  /?category=<id>         - Categories and the products of one of them
//! GET  /products/{id}          - Product detail with complements
//!
//! # Cart
//! GET  /cart                   - Cart lines and subtotal
//! POST /cart/add               - Add one unit {productId, complementIds}
//! POST /cart/update            - Set quantity {productId, quantity}
//! POST /cart/remove            - Remove line {productId}
//! GET  /cart/count             - Units in cart
//!
//! # Checkout
//! GET  /delivery-fees          - Neighborhoods and fees
//! POST /checkout               - Place order {customer, paymentMethod}
//!
//! # Back office
//! /admin/*                     - See [`admin`]
//! ```

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod menu;

use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::{Request, Response, StatusCode},
    middleware,
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the public storefront routes.
pub fn storefront_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::index))
        .route("/products/{id}", get(menu::show))
        .nest("/cart", cart_routes())
        .route("/delivery-fees", get(checkout::delivery_fees))
        .route("/checkout", post(checkout::checkout))
}

/// Build the full application: health checks, storefront, back office,
/// sessions, request ids and request tracing.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(storefront_routes())
        .nest("/admin", admin::admin_routes())
        .layer(session_layer)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the blob store cannot be reached.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping() {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::header;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::db::Store;

    fn test_app() -> Router {
        let state = AppState::new(StorefrontConfig::development("unused"), Store::in_memory());
        app(state)
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_readiness() {
        let response = test_app()
            .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_menu_defaults_to_first_category() {
        let response = test_app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["selectedCategory"], "1");
        assert!(!body["products"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_product_is_404() {
        let response = test_app()
            .oneshot(Request::get("/products/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(json_body(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_cart_update_rejects_zero_quantity() {
        let response = test_app()
            .oneshot(post_json(
                "/cart/update",
                &json!({ "productId": "1", "quantity": 0 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cart_update_rejects_oversized_quantity() {
        let app = test_app();
        let response = app
            .clone()
            .oneshot(post_json("/cart/add", &json!({ "productId": "1" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(post_json(
                "/cart/update",
                &json!({ "productId": "1", "quantity": 4_294_967_295_u32 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(Request::get("/cart/count").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(json_body(response).await["count"], 1);
    }

    #[tokio::test]
    async fn test_checkout_with_empty_cart_redirects_to_cart() {
        let body = json!({
            "customer": {
                "name": "Ana",
                "phone": "(11) 90000-0000",
                "address": {
                    "street": "Rua A",
                    "number": "1",
                    "neighborhood": "Centro",
                    "city": "São Paulo",
                    "state": "SP"
                }
            },
            "paymentMethod": "Pix"
        });

        let response = test_app()
            .oneshot(post_json("/checkout", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/cart");
    }

    #[tokio::test]
    async fn test_admin_requires_session() {
        let response = test_app()
            .oneshot(Request::get("/admin/orders").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/admin/login?redirect=%2Fadmin%2Forders"
        );
    }

    #[tokio::test]
    async fn test_unknown_admin_path_requires_session() {
        let response = test_app()
            .oneshot(Request::get("/admin/nonexistent").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/admin/login?redirect=%2Fadmin%2Fnonexistent"
        );
    }

    #[tokio::test]
    async fn test_storefront_404_is_public() {
        let response = test_app()
            .oneshot(Request::get("/nonexistent").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_login_page_is_public() {
        let response = test_app()
            .oneshot(
                Request::get("/admin/login?redirect=/admin/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains(r#"name="redirect""#));
    }

    #[tokio::test]
    async fn test_wrong_password_is_401() {
        let response = test_app()
            .oneshot(
                Request::post("/admin/login")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("username=admin&password=wrong"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await, json!({ "success": false }));
    }
}
