//! Complement management route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use foodexpress_core::{Complement, ComplementId, ProductId};

use crate::db::{CatalogRepository, ComplementInput};
use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplementQuery {
    /// Only complements tied to this product.
    pub product_id: Option<ProductId>,
}

/// Complement listing, optionally narrowed to one product.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ComplementQuery>,
) -> Json<Vec<Complement>> {
    let catalog = CatalogRepository::new(state.store());
    let complements = match query.product_id {
        Some(id) => catalog.complements_for_product(&id).await,
        None => catalog.list_complements().await,
    };
    Json(complements)
}

#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ComplementInput>,
) -> Result<(StatusCode, Json<Complement>)> {
    let complement = CatalogRepository::new(state.store())
        .add_complement(input)
        .await?;
    Ok((StatusCode::CREATED, Json(complement)))
}

#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ComplementId>,
    Json(input): Json<ComplementInput>,
) -> Result<Json<Complement>> {
    let complement = CatalogRepository::new(state.store())
        .update_complement(&id, input)
        .await?;
    Ok(Json(complement))
}

#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ComplementId>,
) -> Result<Json<Complement>> {
    let complement = CatalogRepository::new(state.store())
        .delete_complement(&id)
        .await?;
    Ok(Json(complement))
}
