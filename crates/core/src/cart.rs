//! Cart lines, line identity and subtotals.
//!
//! A cart is an ordered list of lines. Two lines are the *same line* when
//! they share a product id and the exact same set of selected complement
//! ids; order and duplicates in the selection do not matter. Adding an
//! existing line bumps its quantity instead of appending a row.
//!
//! Line identity is a canonical [`LineKey`] (product id plus sorted, deduped
//! complement ids) kept in a `HashMap` index over the line list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Complement, Product};
use crate::types::{ComplementId, Money, ProductId};

/// Largest quantity a single cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// One cart row: a product snapshot, a quantity and the chosen complements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_complements: Vec<Complement>,
}

impl CartItem {
    /// Product id of this line.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Canonical identity of this line.
    #[must_use]
    pub fn line_key(&self) -> LineKey {
        LineKey::new(&self.product.id, &self.selected_complements)
    }

    /// Base price plus every selected complement, for one unit.
    #[must_use]
    pub fn unit_price(&self) -> Money {
        self.product.price
            + self
                .selected_complements
                .iter()
                .map(|complement| complement.price)
                .sum()
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price() * self.quantity
    }
}

/// Canonical cart line identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
    product_id: ProductId,
    complement_ids: Vec<ComplementId>,
}

impl LineKey {
    /// Build the key for `product_id` with `complements` selected.
    #[must_use]
    pub fn new(product_id: &ProductId, complements: &[Complement]) -> Self {
        let mut complement_ids: Vec<ComplementId> =
            complements.iter().map(|c| c.id.clone()).collect();
        complement_ids.sort();
        complement_ids.dedup();

        Self {
            product_id: product_id.clone(),
            complement_ids,
        }
    }

}

/// Sum of line totals: `(base price + complements) * quantity` per line.
#[must_use]
pub fn subtotal(items: &[CartItem]) -> Money {
    items.iter().map(CartItem::line_total).sum()
}

/// The shopping cart.
///
/// Serialized as a plain array of [`CartItem`]s (the `cart` blob); the line
/// index is rebuilt on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
    index: HashMap<LineKey, usize>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of units across all lines (cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Cart subtotal, complements included.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        subtotal(&self.items)
    }

    /// Add one unit of `product` with `complements` selected.
    ///
    /// Increments the matching line when one exists, otherwise appends a
    /// new line with quantity 1 carrying a copy of the product. A line
    /// already at [`MAX_LINE_QUANTITY`] stays there.
    pub fn add(&mut self, product: &Product, complements: Vec<Complement>) -> &CartItem {
        let key = LineKey::new(&product.id, &complements);

        let position = if let Some(&i) = self.index.get(&key) {
            if let Some(item) = self.items.get_mut(i) {
                if item.quantity < MAX_LINE_QUANTITY {
                    item.quantity += 1;
                }
            }
            i
        } else {
            self.items.push(CartItem {
                product: product.clone(),
                quantity: 1,
                selected_complements: complements,
            });
            let i = self.items.len() - 1;
            self.index.insert(key, i);
            i
        };

        &self.items[position]
    }

    /// Set the quantity of the first line for `product_id`.
    ///
    /// Returns `false` when no line matches. The quantity is stored as given;
    /// callers reject zero and anything above [`MAX_LINE_QUANTITY`].
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        match self.items.iter_mut().find(|item| item.product_id() == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove the first line for `product_id`.
    pub fn remove(&mut self, product_id: &ProductId) -> Option<CartItem> {
        let position = self
            .items
            .iter()
            .position(|item| item.product_id() == product_id)?;
        let removed = self.items.remove(position);
        self.reindex();
        Some(removed)
    }

    /// Remove every line for `product_id`, returning how many were removed.
    pub fn remove_product(&mut self, product_id: &ProductId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.product_id() != product_id);
        let removed = before - self.items.len();
        if removed > 0 {
            self.reindex();
        }
        removed
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }

    /// Take every line out of the cart, leaving it empty.
    pub fn take(&mut self) -> Vec<CartItem> {
        self.index.clear();
        std::mem::take(&mut self.items)
    }

    fn reindex(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.line_key(), i))
            .collect();
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        let mut cart = Self {
            items,
            index: HashMap::new(),
        };
        cart.reindex();
        cart
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
