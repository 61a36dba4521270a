//! Checkout route handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use foodexpress_core::{Customer, DeliveryFee, Money, OrderId, PaymentMethod};

use crate::db::{CartRepository, DeliveryFeeRepository, OrderRepository};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub customer: Customer,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_id: OrderId,
    pub total: Money,
}

/// Neighborhoods we deliver to, with their fees.
#[instrument(skip(state))]
pub async fn delivery_fees(State(state): State<AppState>) -> Json<Vec<DeliveryFee>> {
    Json(DeliveryFeeRepository::new(state.store()).list().await)
}

/// Place an order for the current cart.
///
/// An empty cart sends the customer back to `/cart`. The delivery fee comes
/// from the customer's neighborhood, which must be one we deliver to.
#[instrument(skip_all)]
pub async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Response> {
    let store = state.store();

    if CartRepository::new(store).count().await == 0 {
        return Ok(Redirect::to("/cart").into_response());
    }

    let neighborhood = request.customer.address.neighborhood.trim();
    let fee = DeliveryFeeRepository::new(store)
        .for_neighborhood(neighborhood)
        .await
        .ok_or_else(|| {
            AppError::BadRequest(format!("no delivery to neighborhood '{neighborhood}'"))
        })?;

    // The cart may have been emptied since the check above.
    let Some(order) = OrderRepository::new(store)
        .place(request.customer, request.payment_method, fee.fee)
        .await
    else {
        return Ok(Redirect::to("/cart").into_response());
    };

    add_breadcrumb("checkout", "Order placed", &[("order_id", order.id.as_str())]);

    let body = CheckoutResponse {
        total: order.total(),
        order_id: order.id,
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}
