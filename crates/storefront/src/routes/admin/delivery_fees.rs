//! Delivery-fee management route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use foodexpress_core::{DeliveryFee, DeliveryFeeId, Money};

use crate::db::{DeliveryFeeInput, DeliveryFeeRepository};
use crate::error::Result;
use crate::state::AppState;

/// Only the fee of an existing neighborhood can be changed.
#[derive(Debug, Deserialize)]
pub struct UpdateFeeRequest {
    pub fee: Money,
}

#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<DeliveryFee>> {
    Json(DeliveryFeeRepository::new(state.store()).list().await)
}

#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<DeliveryFeeInput>,
) -> Result<(StatusCode, Json<DeliveryFee>)> {
    let fee = DeliveryFeeRepository::new(state.store()).add(input).await?;
    Ok((StatusCode::CREATED, Json(fee)))
}

#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DeliveryFeeId>,
    Json(request): Json<UpdateFeeRequest>,
) -> Result<Json<DeliveryFee>> {
    let fee = DeliveryFeeRepository::new(state.store())
        .update_fee(&id, request.fee)
        .await?;
    Ok(Json(fee))
}

#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DeliveryFeeId>,
) -> Result<Json<DeliveryFee>> {
    let fee = DeliveryFeeRepository::new(state.store())
        .delete(&id)
        .await?;
    Ok(Json(fee))
}
