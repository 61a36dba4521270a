//! Category management route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;

use foodexpress_core::{Category, CategoryId};

use crate::db::{CatalogRepository, CategoryInput};
use crate::error::Result;
use crate::state::AppState;

/// A category with the number of products filed under it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    #[serde(flatten)]
    pub category: Category,
    pub product_count: usize,
}

/// Category listing.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<CategoryView>> {
    let catalog = CatalogRepository::new(state.store());
    let products = catalog.list_products().await;

    let views = catalog
        .list_categories()
        .await
        .into_iter()
        .map(|category| CategoryView {
            product_count: products
                .iter()
                .filter(|p| p.category_id.as_ref() == Some(&category.id))
                .count(),
            category,
        })
        .collect();
    Json(views)
}

#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CategoryInput>,
) -> Result<(StatusCode, Json<Category>)> {
    let category = CatalogRepository::new(state.store())
        .add_category(input)
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(input): Json<CategoryInput>,
) -> Result<Json<Category>> {
    let category = CatalogRepository::new(state.store())
        .update_category(&id, input)
        .await?;
    Ok(Json(category))
}

/// Delete an empty category; populated ones are refused with 409.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<Category>> {
    let category = CatalogRepository::new(state.store())
        .delete_category(&id)
        .await?;
    Ok(Json(category))
}
