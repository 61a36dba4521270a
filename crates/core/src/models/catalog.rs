//! Menu catalog records.

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, ComplementId, Money, ProductId};

/// A menu section (e.g. "Hambúrgueres").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A dish or drink on the menu.
///
/// Complements are not embedded; they are joined from the complement store
/// when a [`ProductDetail`] is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

/// A paid add-on such as extra cheese.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complement {
    pub id: ComplementId,
    pub name: String,
    pub price: Money,
    /// `None` means the complement is offered with every product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
}

impl Complement {
    /// Whether this complement may be selected for `product_id`.
    #[must_use]
    pub fn applies_to(&self, product_id: &ProductId) -> bool {
        self.product_id.as_ref().is_none_or(|id| id == product_id)
    }
}

/// A product joined with the complements offered for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub complements: Vec<Complement>,
}
