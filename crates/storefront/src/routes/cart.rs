//! Cart route handlers.
//!
//! The cart is shared by the whole store. Operations on products that are
//! not in the menu (or not in the cart) leave it unchanged.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use foodexpress_core::{Cart, CartItem, ComplementId, MAX_LINE_QUANTITY, Money, ProductId};

use crate::db::CartRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

// =============================================================================
// Request and Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    #[serde(default)]
    pub complement_ids: Vec<ComplementId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// One cart line with its computed total.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    #[serde(flatten)]
    pub item: CartItem,
    pub line_total: Money,
}

/// Cart page data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub subtotal: Money,
    pub item_count: u32,
}

impl From<Cart> for CartView {
    fn from(cart: Cart) -> Self {
        Self {
            subtotal: cart.subtotal(),
            item_count: cart.item_count(),
            items: cart
                .items()
                .iter()
                .map(|item| CartLineView {
                    line_total: item.line_total(),
                    item: item.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCount {
    pub count: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartResponse {
    /// The line that received the unit; absent for unknown products.
    pub line: Option<CartItem>,
    pub count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let cart = CartRepository::new(state.store()).get().await;
    Json(cart.into())
}

/// Add one unit of a product, with the selected complements.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<AddToCartResponse>> {
    let cart = CartRepository::new(state.store());
    let line = cart.add(&request.product_id, &request.complement_ids).await?;

    if line.is_some() {
        add_breadcrumb(
            "cart",
            "Added to cart",
            &[("product_id", request.product_id.as_str())],
        );
    }

    Ok(Json(AddToCartResponse {
        line,
        count: cart.count().await,
    }))
}

/// Set the quantity of a product's line.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<CartView>> {
    if request.quantity == 0 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }
    if request.quantity > MAX_LINE_QUANTITY {
        return Err(AppError::BadRequest(format!(
            "quantity must be at most {MAX_LINE_QUANTITY}"
        )));
    }

    let cart = CartRepository::new(state.store());
    cart.update_quantity(&request.product_id, request.quantity)
        .await;
    Ok(Json(cart.get().await.into()))
}

/// Remove a product's line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<RemoveFromCartRequest>,
) -> Json<CartView> {
    let cart = CartRepository::new(state.store());
    cart.remove(&request.product_id).await;
    Json(cart.get().await.into())
}

/// Units in the cart, for the header badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    Json(CartCount {
        count: CartRepository::new(state.store()).count().await,
    })
}
