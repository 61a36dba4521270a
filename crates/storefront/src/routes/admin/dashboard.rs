//! Dashboard route handlers.

use axum::{Json, extract::State, response::Redirect};
use serde::Serialize;
use tracing::instrument;

use foodexpress_core::{Money, Order};

use crate::db::{CatalogRepository, DeliveryFeeRepository, OrderRepository, StatusCount};
use crate::middleware::{RequireAdminAuth, auth::DEFAULT_ADMIN_PATH};
use crate::state::AppState;

/// Active orders shown on the dashboard.
const ACTIVE_ORDERS_LIMIT: usize = 5;

/// Dashboard counters.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub products: usize,
    pub categories: usize,
    pub complements: usize,
    pub delivery_fees: usize,
    pub orders: usize,
    pub revenue: Money,
    pub orders_by_status: Vec<StatusCount>,
}

/// Dashboard page data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub admin: String,
    pub metrics: DashboardMetrics,
    pub active_orders: Vec<Order>,
}

/// `/admin` lands on the dashboard.
pub async fn index() -> Redirect {
    Redirect::to(DEFAULT_ADMIN_PATH)
}

/// Display the dashboard.
#[instrument(skip_all)]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Json<DashboardView> {
    let store = state.store();
    let catalog = CatalogRepository::new(store);
    let orders = OrderRepository::new(store);
    let stats = orders.stats().await;

    let metrics = DashboardMetrics {
        products: catalog.list_products().await.len(),
        categories: catalog.list_categories().await.len(),
        complements: catalog.list_complements().await.len(),
        delivery_fees: DeliveryFeeRepository::new(store).list().await.len(),
        orders: stats.count,
        revenue: stats.revenue,
        orders_by_status: stats.by_status,
    };

    Json(DashboardView {
        admin: admin.username,
        metrics,
        active_orders: orders.active(ACTIVE_ORDERS_LIMIT).await,
    })
}
