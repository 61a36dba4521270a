//! Integration tests for FoodExpress.
//!
//! Each test spawns the full application (storefront, back office, sessions)
//! on an ephemeral port over an in-memory store seeded with the built-in
//! data, then drives it over HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p foodexpress-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout` - Cart and checkout flow
//! - `admin_session` - Back office login gate
//! - `admin_catalog` - Back office catalog and order management

use std::net::SocketAddr;

use reqwest::{Client, redirect::Policy};
use serde_json::{Value, json};

use foodexpress_storefront::config::{DEV_ADMIN_PASSWORD, StorefrontConfig};
use foodexpress_storefront::db::Store;
use foodexpress_storefront::routes;
use foodexpress_storefront::state::AppState;

/// A running application and a cookie-keeping client for it.
pub struct TestServer {
    pub addr: SocketAddr,
    /// Keeps cookies and never follows redirects.
    pub client: Client,
}

impl TestServer {
    /// Spawn the application on `127.0.0.1:0`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound or the client cannot be built.
    pub async fn spawn() -> Self {
        let config = StorefrontConfig::development("unused");
        let app = routes::app(AppState::new(config, Store::in_memory()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("build client");

        Self { addr, client }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Log into the back office with the development credentials.
    ///
    /// # Errors
    ///
    /// Returns the transport error, if any.
    pub async fn login(&self, redirect: Option<&str>) -> reqwest::Result<reqwest::Response> {
        let mut form = vec![("username", "admin"), ("password", DEV_ADMIN_PASSWORD)];
        if let Some(redirect) = redirect {
            form.push(("redirect", redirect));
        }
        self.client
            .post(self.url("/admin/login"))
            .form(&form)
            .send()
            .await
    }
}

/// A checkout body for a customer in `neighborhood`.
#[must_use]
pub fn checkout_body(neighborhood: &str, payment_method: &str) -> Value {
    json!({
        "customer": {
            "name": "Maria Souza",
            "phone": "(11) 98888-7777",
            "address": {
                "street": "Rua das Flores",
                "number": "42",
                "neighborhood": neighborhood,
                "city": "São Paulo",
                "state": "SP"
            }
        },
        "paymentMethod": payment_method
    })
}
