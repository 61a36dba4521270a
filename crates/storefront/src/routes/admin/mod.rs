//! Back office route handlers, mounted under `/admin`.
//!
//! # Route Structure
//!
//! ```text
//! GET  /login                     - Login page
//! POST /login                     - Login action
//! POST /logout                    - Logout action
//!
//! GET  /                          - Redirect to dashboard
//! GET  /dashboard                 - Counters, revenue, active orders
//!
//! GET|POST        /products
//! GET|PUT|DELETE  /products/{id}
//! GET|POST        /categories
//! PUT|DELETE      /categories/{id}
//! GET|POST        /complements
//! PUT|DELETE      /complements/{id}
//! GET|POST        /delivery-fees
//! PUT|DELETE      /delivery-fees/{id}
//! GET             /orders
//! GET             /orders/{id}
//! POST            /orders/{id}/status
//! ```
//!
//! Everything except the login page sits behind [`require_admin`],
//! including paths no route matches.

pub mod auth;
pub mod categories;
pub mod complements;
pub mod dashboard;
pub mod delivery_fees;
pub mod orders;
pub mod products;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::error::AppError;
use crate::middleware::require_admin;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("page".to_string())
}

fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/dashboard", get(dashboard::show))
        .route("/logout", post(auth::logout))
        .route("/products", get(products::index).post(products::create))
        .route(
            "/products/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
        .route(
            "/categories",
            get(categories::index).post(categories::create),
        )
        .route(
            "/categories/{id}",
            put(categories::update).delete(categories::delete),
        )
        .route(
            "/complements",
            get(complements::index).post(complements::create),
        )
        .route(
            "/complements/{id}",
            put(complements::update).delete(complements::delete),
        )
        .route(
            "/delivery-fees",
            get(delivery_fees::index).post(delivery_fees::create),
        )
        .route(
            "/delivery-fees/{id}",
            put(delivery_fees::update).delete(delivery_fees::delete),
        )
        .route("/orders", get(orders::index))
        .route("/orders/{id}", get(orders::show))
        .route("/orders/{id}/status", post(orders::update_status))
        .fallback(not_found)
        .layer(middleware::from_fn(require_admin))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .merge(protected_routes())
}
