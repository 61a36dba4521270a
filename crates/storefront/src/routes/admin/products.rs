//! Product management route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use foodexpress_core::{Product, ProductDetail, ProductId};

use crate::db::{CatalogRepository, ProductDeletion, ProductInput};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product listing.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(CatalogRepository::new(state.store()).list_products().await)
}

/// Product detail, with the complements that apply to it.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetail>> {
    CatalogRepository::new(state.store())
        .product_detail(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Create a product.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = CatalogRepository::new(state.store())
        .add_product(input)
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product's fields.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>> {
    let product = CatalogRepository::new(state.store())
        .update_product(&id, input)
        .await?;
    Ok(Json(product))
}

/// Delete a product, its cart lines and its own complements.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDeletion>> {
    let deletion = CatalogRepository::new(state.store())
        .delete_product(&id)
        .await?;
    Ok(Json(deletion))
}
