//! Order management route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use foodexpress_core::{Money, Order, OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// An order with its computed amounts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub subtotal: Money,
    pub total: Money,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        Self {
            subtotal: order.subtotal(),
            total: order.total(),
            order,
        }
    }
}

/// Order listing, newest first, optionally filtered by status.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Json<Vec<OrderView>> {
    let orders = OrderRepository::new(state.store())
        .list()
        .await
        .into_iter()
        .filter(|o| query.status.is_none_or(|status| o.status == status))
        .map(OrderView::from)
        .collect();
    Json(orders)
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderView>> {
    OrderRepository::new(state.store())
        .get(&id)
        .await
        .map(|order| Json(order.into()))
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}

/// Set an order's status. Any status may follow any other.
#[instrument(skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<OrderView>> {
    let order = OrderRepository::new(state.store())
        .update_status(&id, request.status)
        .await?;
    Ok(Json(order.into()))
}
