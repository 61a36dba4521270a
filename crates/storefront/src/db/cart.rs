//! Cart repository.
//!
//! There is one cart for the whole store, persisted as the `cart` blob.

use foodexpress_core::{Cart, CartItem, Complement, ComplementId, ProductId};

use super::catalog::applicable;
use super::store::Store;
use super::{BlobKey, RepositoryError};

/// Repository for cart operations.
pub struct CartRepository<'a> {
    store: &'a Store,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Snapshot of the current cart.
    pub async fn get(&self) -> Cart {
        self.store.read().await.cart.clone()
    }

    /// Units in the cart.
    pub async fn count(&self) -> u32 {
        self.store.read().await.cart.item_count()
    }

    /// Add one unit of a product with the given complements selected.
    ///
    /// Returns `Ok(None)` without touching the cart when the product does
    /// not exist. Complement ids are resolved against the complements that
    /// apply to the product; repeated ids count once.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if a complement id is unknown or
    /// belongs to another product.
    pub async fn add(
        &self,
        product_id: &ProductId,
        complement_ids: &[ComplementId],
    ) -> Result<Option<CartItem>, RepositoryError> {
        let mut data = self.store.write().await;

        let Some(product) = data.products.iter().find(|p| &p.id == product_id).cloned() else {
            tracing::debug!(product_id = %product_id, "Add to cart ignored, unknown product");
            return Ok(None);
        };

        let mut selected: Vec<Complement> = Vec::with_capacity(complement_ids.len());
        for id in complement_ids {
            if selected.iter().any(|c| &c.id == id) {
                continue;
            }
            let complement = applicable(&data, product_id)
                .find(|c| &c.id == id)
                .cloned()
                .ok_or_else(|| {
                    RepositoryError::Validation(format!(
                        "complement {id} is not available for product {product_id}"
                    ))
                })?;
            selected.push(complement);
        }

        let line = data.cart.add(&product, selected).clone();
        self.store.persist(&data, &[BlobKey::Cart]);

        tracing::info!(
            product_id = %product_id,
            quantity = line.quantity,
            complements = line.selected_complements.len(),
            "Added to cart"
        );
        Ok(Some(line))
    }

    /// Set the quantity of the first line for `product_id`.
    ///
    /// Returns `false` when the cart has no such line.
    pub async fn update_quantity(&self, product_id: &ProductId, quantity: u32) -> bool {
        let mut data = self.store.write().await;
        let updated = data.cart.update_quantity(product_id, quantity);
        if updated {
            self.store.persist(&data, &[BlobKey::Cart]);
            tracing::info!(product_id = %product_id, quantity, "Cart quantity updated");
        }
        updated
    }

    /// Remove the first line for `product_id`.
    ///
    /// Returns `false` when the cart has no such line.
    pub async fn remove(&self, product_id: &ProductId) -> bool {
        let mut data = self.store.write().await;
        let removed = data.cart.remove(product_id).is_some();
        if removed {
            self.store.persist(&data, &[BlobKey::Cart]);
            tracing::info!(product_id = %product_id, "Removed from cart");
        }
        removed
    }

    /// Empty the cart.
    pub async fn clear(&self) {
        let mut data = self.store.write().await;
        data.cart.clear();
        self.store.persist(&data, &[BlobKey::Cart]);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use foodexpress_core::Money;

    use super::*;
    use crate::db::{CatalogRepository, CategoryInput, ComplementInput, ProductInput};

    #[tokio::test]
    async fn test_unknown_product_is_noop() {
        let store = Store::in_memory();
        let cart = CartRepository::new(&store);

        let line = cart.add(&ProductId::new("missing"), &[]).await.unwrap();

        assert!(line.is_none());
        assert!(cart.get().await.is_empty());
    }

    #[tokio::test]
    async fn test_complement_of_other_product_is_rejected() {
        let store = Store::in_memory();
        let cart = CartRepository::new(&store);

        // Complement 4 belongs to the pizza.
        let result = cart
            .add(&ProductId::new("1"), &[ComplementId::new("4")])
            .await;

        assert!(matches!(result, Err(RepositoryError::Validation(_))));
        assert!(cart.get().await.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_complement_ids_count_once() {
        let store = Store::in_memory();
        let cart = CartRepository::new(&store);
        let burger = ProductId::new("1");
        let cheddar = ComplementId::new("2");

        cart.add(&burger, &[cheddar.clone(), cheddar.clone()])
            .await
            .unwrap();
        let line = cart.add(&burger, &[cheddar]).await.unwrap().unwrap();

        assert_eq!(line.quantity, 2);
        assert_eq!(line.selected_complements.len(), 1);
        assert_eq!(cart.get().await.subtotal(), Money::from_cents(5880));
    }

    #[tokio::test]
    async fn test_burger_scenario_line_total() {
        let store = Store::in_memory();
        let catalog = CatalogRepository::new(&store);
        let cart = CartRepository::new(&store);

        let category = catalog
            .add_category(CategoryInput {
                name: "Burgers".to_string(),
                description: None,
            })
            .await
            .unwrap();
        let product = catalog
            .add_product(ProductInput {
                name: "Burger".to_string(),
                description: String::new(),
                price: Money::from_cents(1000),
                image: None,
                ingredients: Vec::new(),
                category_id: Some(category.id.clone()),
            })
            .await
            .unwrap();
        let c1 = catalog
            .add_complement(ComplementInput {
                name: "c1".to_string(),
                price: Money::from_cents(200),
                product_id: Some(product.id.clone()),
            })
            .await
            .unwrap();

        cart.add(&product.id, &[c1.id.clone()]).await.unwrap();
        cart.add(&product.id, &[c1.id.clone()]).await.unwrap();

        let snapshot = cart.get().await;
        assert_eq!(snapshot.len(), 1);
        let line = snapshot.items().first().unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.line_total(), Money::from_cents(2400));
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let store = Store::in_memory();
        let cart = CartRepository::new(&store);
        let pizza = ProductId::new("2");

        cart.add(&pizza, &[]).await.unwrap();
        assert!(cart.update_quantity(&pizza, 3).await);
        assert_eq!(cart.count().await, 3);

        assert!(cart.remove(&pizza).await);
        assert!(!cart.remove(&pizza).await);
        assert_eq!(cart.count().await, 0);
    }

    #[tokio::test]
    async fn test_cart_is_persisted() {
        let blobs = std::sync::Arc::new(crate::db::MemoryBlobStore::new());
        let store = Store::open(blobs.clone());
        CartRepository::new(&store)
            .add(&ProductId::new("4"), &[])
            .await
            .unwrap();

        let reopened = Store::open(blobs);
        assert_eq!(CartRepository::new(&reopened).count().await, 1);
    }
}
