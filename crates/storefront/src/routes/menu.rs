//! Public menu route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use foodexpress_core::{Category, CategoryId, Product, ProductDetail, ProductId};

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the menu page.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<CategoryId>,
}

/// Menu page data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuView {
    pub categories: Vec<Category>,
    /// The category being shown; the first one when none was requested.
    pub selected_category: Option<CategoryId>,
    pub products: Vec<Product>,
}

/// Display the menu, one category at a time.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Json<MenuView> {
    let catalog = CatalogRepository::new(state.store());
    let categories = catalog.list_categories().await;

    let selected_category = query
        .category
        .or_else(|| categories.first().map(|c| c.id.clone()));
    let products = match &selected_category {
        Some(id) => catalog.products_by_category(id).await,
        None => Vec::new(),
    };

    Json(MenuView {
        categories,
        selected_category,
        products,
    })
}

/// Display a product with the complements that can be added to it.
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
