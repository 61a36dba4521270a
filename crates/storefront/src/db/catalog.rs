//! Catalog repository: categories, products and complements.
//!
//! The product ↔ complement relation is not stored on the product; it is
//! derived from `Complement::product_id` whenever a product is read.

use serde::{Deserialize, Serialize};

use foodexpress_core::{
    Category, CategoryId, Complement, ComplementId, Money, Product, ProductDetail, ProductId,
};

use super::store::{Store, StoreData};
use super::{BlobKey, CatalogError, RepositoryError};

/// Fields accepted when creating or replacing a category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Fields accepted when creating or replacing a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

/// Fields accepted when creating or replacing a complement.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplementInput {
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub product_id: Option<ProductId>,
}

/// Outcome of a product deletion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDeletion {
    pub product: Product,
    pub removed_cart_lines: usize,
    pub removed_complements: usize,
}

/// Repository for catalog operations.
pub struct CatalogRepository<'a> {
    store: &'a Store,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// All categories in menu order.
    pub async fn list_categories(&self) -> Vec<Category> {
        self.store.read().await.categories.clone()
    }

    pub async fn get_category(&self, id: &CategoryId) -> Option<Category> {
        self.store
            .read()
            .await
            .categories
            .iter()
            .find(|c| &c.id == id)
            .cloned()
    }

    /// Create a category with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the name is blank.
    pub async fn add_category(&self, input: CategoryInput) -> Result<Category, RepositoryError> {
        let input = input.normalized()?;
        let category = Category {
            id: CategoryId::generate(),
            name: input.name,
            description: input.description,
        };

        let mut data = self.store.write().await;
        data.categories.push(category.clone());
        self.store.persist(&data, &[BlobKey::Categories]);

        tracing::info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Replace a category's name and description.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category does not exist, or
    /// `RepositoryError::Validation` if the name is blank.
    pub async fn update_category(
        &self,
        id: &CategoryId,
        input: CategoryInput,
    ) -> Result<Category, RepositoryError> {
        let input = input.normalized()?;

        let mut data = self.store.write().await;
        let category = data
            .categories
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("category {id}")))?;
        category.name = input.name;
        category.description = input.description;
        let updated = category.clone();
        self.store.persist(&data, &[BlobKey::Categories]);

        tracing::info!(category_id = %id, "Category updated");
        Ok(updated)
    }

    /// Delete a category that no product references.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::CategoryHasProducts` if any product references
    /// it (nothing is changed), or `RepositoryError::NotFound`.
    pub async fn delete_category(&self, id: &CategoryId) -> Result<Category, RepositoryError> {
        let mut data = self.store.write().await;

        let count = data
            .products
            .iter()
            .filter(|p| p.category_id.as_ref() == Some(id))
            .count();
        if count > 0 {
            return Err(CatalogError::CategoryHasProducts {
                id: id.clone(),
                count,
            }
            .into());
        }

        let index = data
            .categories
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("category {id}")))?;
        let removed = data.categories.remove(index);
        self.store.persist(&data, &[BlobKey::Categories]);

        tracing::info!(category_id = %id, "Category deleted");
        Ok(removed)
    }

    // =========================================================================
    // Products
    // =========================================================================

    pub async fn list_products(&self) -> Vec<Product> {
        self.store.read().await.products.clone()
    }

    /// Products whose `category_id` equals `id`.
    pub async fn products_by_category(&self, id: &CategoryId) -> Vec<Product> {
        self.store
            .read()
            .await
            .products
            .iter()
            .filter(|p| p.category_id.as_ref() == Some(id))
            .cloned()
            .collect()
    }

    pub async fn get_product(&self, id: &ProductId) -> Option<Product> {
        self.store
            .read()
            .await
            .products
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }

    /// A product together with every complement that applies to it.
    pub async fn product_detail(&self, id: &ProductId) -> Option<ProductDetail> {
        let data = self.store.read().await;
        let product = data.products.iter().find(|p| &p.id == id)?.clone();
        let complements = applicable(&data, id).cloned().collect();

        Some(ProductDetail {
            product,
            complements,
        })
    }

    /// Create a product with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::CategoryNotFound` if `category_id` is set and
    /// unknown (nothing is changed), or `RepositoryError::Validation`.
    pub async fn add_product(&self, input: ProductInput) -> Result<Product, RepositoryError> {
        let input = input.normalized()?;

        let mut data = self.store.write().await;
        ensure_category(&data, input.category_id.as_ref())?;

        let product = input.into_product(ProductId::generate());
        data.products.push(product.clone());
        self.store.persist(&data, &[BlobKey::Products]);

        tracing::info!(product_id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Replace a product's fields, keeping its id.
    ///
    /// Cart lines and orders keep the snapshot they were created with.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound`, `CatalogError::CategoryNotFound`
    /// (nothing is changed) or `RepositoryError::Validation`.
    pub async fn update_product(
        &self,
        id: &ProductId,
        input: ProductInput,
    ) -> Result<Product, RepositoryError> {
        let input = input.normalized()?;

        let mut data = self.store.write().await;
        ensure_category(&data, input.category_id.as_ref())?;

        let product = data
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("product {id}")))?;
        *product = input.into_product(id.clone());
        let updated = product.clone();
        self.store.persist(&data, &[BlobKey::Products]);

        tracing::info!(product_id = %id, "Product updated");
        Ok(updated)
    }

    /// Delete a product, every cart line for it and every complement tied to it.
    ///
    /// The three blobs are written one after another, not atomically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub async fn delete_product(&self, id: &ProductId) -> Result<ProductDeletion, RepositoryError> {
        let mut data = self.store.write().await;

        let index = data
            .products
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("product {id}")))?;
        let product = data.products.remove(index);

        let removed_cart_lines = data.cart.remove_product(id);

        let before = data.complements.len();
        data.complements
            .retain(|c| c.product_id.as_ref() != Some(id));
        let removed_complements = before - data.complements.len();

        self.store.persist(
            &data,
            &[BlobKey::Products, BlobKey::Cart, BlobKey::Complements],
        );

        tracing::info!(
            product_id = %id,
            removed_cart_lines,
            removed_complements,
            "Product deleted"
        );
        Ok(ProductDeletion {
            product,
            removed_cart_lines,
            removed_complements,
        })
    }

    // =========================================================================
    // Complements
    // =========================================================================

    pub async fn list_complements(&self) -> Vec<Complement> {
        self.store.read().await.complements.clone()
    }

    pub async fn get_complement(&self, id: &ComplementId) -> Option<Complement> {
        self.store
            .read()
            .await
            .complements
            .iter()
            .find(|c| &c.id == id)
            .cloned()
    }

    /// Complements tied to exactly this product.
    pub async fn complements_for_product(&self, id: &ProductId) -> Vec<Complement> {
        self.store
            .read()
            .await
            .complements
            .iter()
            .filter(|c| c.product_id.as_ref() == Some(id))
            .cloned()
            .collect()
    }

    /// Complements tied to this product plus global ones.
    pub async fn applicable_complements(&self, id: &ProductId) -> Vec<Complement> {
        let data = self.store.read().await;
        applicable(&data, id).cloned().collect()
    }

    /// Create a complement with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` if `product_id` is set and
    /// unknown (nothing is changed), or `RepositoryError::Validation`.
    pub async fn add_complement(&self, input: ComplementInput) -> Result<Complement, RepositoryError> {
        let input = input.normalized()?;

        let mut data = self.store.write().await;
        ensure_product(&data, input.product_id.as_ref())?;

        let complement = Complement {
            id: ComplementId::generate(),
            name: input.name,
            price: input.price,
            product_id: input.product_id,
        };
        data.complements.push(complement.clone());
        self.store.persist(&data, &[BlobKey::Complements]);

        tracing::info!(complement_id = %complement.id, name = %complement.name, "Complement created");
        Ok(complement)
    }

    /// Replace a complement's fields; moving it to another product is just a
    /// different `product_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound`, `CatalogError::ProductNotFound`
    /// (nothing is changed) or `RepositoryError::Validation`.
    pub async fn update_complement(
        &self,
        id: &ComplementId,
        input: ComplementInput,
    ) -> Result<Complement, RepositoryError> {
        let input = input.normalized()?;

        let mut data = self.store.write().await;
        ensure_product(&data, input.product_id.as_ref())?;

        let complement = data
            .complements
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("complement {id}")))?;
        complement.name = input.name;
        complement.price = input.price;
        complement.product_id = input.product_id;
        let updated = complement.clone();
        self.store.persist(&data, &[BlobKey::Complements]);

        tracing::info!(complement_id = %id, "Complement updated");
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the complement does not exist.
    pub async fn delete_complement(&self, id: &ComplementId) -> Result<Complement, RepositoryError> {
        let mut data = self.store.write().await;

        let index = data
            .complements
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("complement {id}")))?;
        let removed = data.complements.remove(index);
        self.store.persist(&data, &[BlobKey::Complements]);

        tracing::info!(complement_id = %id, "Complement deleted");
        Ok(removed)
    }
}

/// Complements applicable to `product_id`: tied to it, or global.
pub(crate) fn applicable<'d>(
    data: &'d StoreData,
    product_id: &'d ProductId,
) -> impl Iterator<Item = &'d Complement> {
    data.complements.iter().filter(|c| c.applies_to(product_id))
}

fn ensure_category(data: &StoreData, id: Option<&CategoryId>) -> Result<(), CatalogError> {
    match id {
        Some(id) if !data.categories.iter().any(|c| &c.id == id) => {
            Err(CatalogError::CategoryNotFound(id.clone()))
        }
        _ => Ok(()),
    }
}

fn ensure_product(data: &StoreData, id: Option<&ProductId>) -> Result<(), CatalogError> {
    match id {
        Some(id) if !data.products.iter().any(|p| &p.id == id) => {
            Err(CatalogError::ProductNotFound(id.clone()))
        }
        _ => Ok(()),
    }
}

fn required_name(name: String, what: &str) -> Result<String, RepositoryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RepositoryError::Validation(format!("{what} name is required")));
    }
    Ok(trimmed.to_string())
}

fn non_negative(price: Money, what: &str) -> Result<Money, RepositoryError> {
    if price.is_negative() {
        return Err(RepositoryError::Validation(format!(
            "{what} must not be negative"
        )));
    }
    Ok(price)
}

/// Empty optional strings and ids from forms mean "unset".
fn non_empty<T: AsRef<str>>(value: Option<T>) -> Option<T> {
    value.filter(|v| !v.as_ref().trim().is_empty())
}

impl CategoryInput {
    fn normalized(self) -> Result<Self, RepositoryError> {
        Ok(Self {
            name: required_name(self.name, "category")?,
            description: non_empty(self.description),
        })
    }
}

impl ProductInput {
    fn normalized(self) -> Result<Self, RepositoryError> {
        Ok(Self {
            name: required_name(self.name, "product")?,
            description: self.description,
            price: non_negative(self.price, "price")?,
            image: non_empty(self.image),
            ingredients: self
                .ingredients
                .into_iter()
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect(),
            category_id: non_empty(self.category_id),
        })
    }

    fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            image: self.image,
            ingredients: self.ingredients,
            category_id: self.category_id,
        }
    }
}

impl ComplementInput {
    fn normalized(self) -> Result<Self, RepositoryError> {
        Ok(Self {
            name: required_name(self.name, "complement")?,
            price: non_negative(self.price, "price")?,
            product_id: non_empty(self.product_id),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::CartRepository;

    fn burger_input(category_id: Option<&str>) -> ProductInput {
        ProductInput {
            name: "Burger".to_string(),
            description: String::new(),
            price: Money::from_cents(1000),
            image: None,
            ingredients: Vec::new(),
            category_id: category_id.map(CategoryId::new),
        }
    }

    #[tokio::test]
    async fn test_add_product_with_unknown_category_does_not_mutate() {
        let store = Store::in_memory();
        let repo = CatalogRepository::new(&store);

        let result = repo.add_product(burger_input(Some("missing"))).await;

        assert!(matches!(
            result,
            Err(RepositoryError::Catalog(CatalogError::CategoryNotFound(_)))
        ));
        assert_eq!(repo.list_products().await.len(), 6);
    }

    #[tokio::test]
    async fn test_update_product_with_unknown_category_does_not_mutate() {
        let store = Store::in_memory();
        let repo = CatalogRepository::new(&store);
        let id = ProductId::new("1");

        let result = repo.update_product(&id, burger_input(Some("missing"))).await;

        assert!(matches!(
            result,
            Err(RepositoryError::Catalog(CatalogError::CategoryNotFound(_)))
        ));
        assert_eq!(repo.get_product(&id).await.unwrap().name, "X-Burger Especial");
    }

    #[tokio::test]
    async fn test_add_product_without_category() {
        let store = Store::in_memory();
        let repo = CatalogRepository::new(&store);

        let product = repo.add_product(burger_input(Some(""))).await.unwrap();

        assert!(product.category_id.is_none());
        assert!(repo.get_product(&product.id).await.is_some());
    }

    #[tokio::test]
    async fn test_add_complement_with_unknown_product_does_not_mutate() {
        let store = Store::in_memory();
        let repo = CatalogRepository::new(&store);

        let result = repo
            .add_complement(ComplementInput {
                name: "Extra".to_string(),
                price: Money::from_cents(100),
                product_id: Some(ProductId::new("missing")),
            })
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::Catalog(CatalogError::ProductNotFound(_)))
        ));
        assert_eq!(repo.list_complements().await.len(), 7);
    }

    #[tokio::test]
    async fn test_delete_populated_category_fails() {
        let store = Store::in_memory();
        let repo = CatalogRepository::new(&store);
        let id = CategoryId::new("1");

        let result = repo.delete_category(&id).await;

        assert!(matches!(
            result,
            Err(RepositoryError::Catalog(CatalogError::CategoryHasProducts { count: 1, .. }))
        ));
        assert!(repo.get_category(&id).await.is_some());
        assert_eq!(repo.products_by_category(&id).await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_empty_category() {
        let store = Store::in_memory();
        let repo = CatalogRepository::new(&store);
        let category = repo
            .add_category(CategoryInput {
                name: "Lanches".to_string(),
                description: None,
            })
            .await
            .unwrap();

        repo.delete_category(&category.id).await.unwrap();

        assert!(repo.get_category(&category.id).await.is_none());
        assert_eq!(repo.list_categories().await.len(), 5);
    }

    #[tokio::test]
    async fn test_delete_product_cascades() {
        let store = Store::in_memory();
        let repo = CatalogRepository::new(&store);
        let cart = CartRepository::new(&store);
        let burger = ProductId::new("1");
        let pizza = ProductId::new("2");

        cart.add(&burger, &[ComplementId::new("2")]).await.unwrap();
        cart.add(&burger, &[]).await.unwrap();
        cart.add(&pizza, &[]).await.unwrap();

        let deletion = repo.delete_product(&burger).await.unwrap();

        assert_eq!(deletion.removed_cart_lines, 2);
        assert_eq!(deletion.removed_complements, 5);
        assert!(repo.get_product(&burger).await.is_none());
        assert!(repo.complements_for_product(&burger).await.is_empty());
        assert_eq!(repo.list_complements().await.len(), 2);

        let remaining = cart.get().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining.items().first().unwrap().product.id, pizza);
    }

    #[tokio::test]
    async fn test_update_missing_records_report_not_found() {
        let store = Store::in_memory();
        let repo = CatalogRepository::new(&store);

        let result = repo
            .update_category(
                &CategoryId::new("missing"),
                CategoryInput {
                    name: "X".to_string(),
                    description: None,
                },
            )
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));

        let result = repo.delete_complement(&ComplementId::new("missing")).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_applicable_complements_include_global() {
        let store = Store::in_memory();
        let repo = CatalogRepository::new(&store);
        let global = repo
            .add_complement(ComplementInput {
                name: "Guardanapo extra".to_string(),
                price: Money::ZERO,
                product_id: None,
            })
            .await
            .unwrap();

        let pizza = ProductId::new("2");
        let exact = repo.complements_for_product(&pizza).await;
        let applicable = repo.applicable_complements(&pizza).await;

        assert_eq!(exact.len(), 2);
        assert_eq!(applicable.len(), 3);
        assert!(applicable.iter().any(|c| c.id == global.id));

        let detail = repo.product_detail(&pizza).await.unwrap();
        assert_eq!(detail.complements.len(), 3);
    }

    #[tokio::test]
    async fn test_rehome_complement() {
        let store = Store::in_memory();
        let repo = CatalogRepository::new(&store);
        let id = ComplementId::new("5");

        repo.update_complement(
            &id,
            ComplementInput {
                name: "Molho extra".to_string(),
                price: Money::from_cents(250),
                product_id: Some(ProductId::new("3")),
            },
        )
        .await
        .unwrap();

        assert_eq!(repo.complements_for_product(&ProductId::new("2")).await.len(), 1);
        assert_eq!(repo.complements_for_product(&ProductId::new("3")).await.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let store = Store::in_memory();
        let repo = CatalogRepository::new(&store);

        let result = repo
            .add_category(CategoryInput {
                name: "   ".to_string(),
                description: None,
            })
            .await;

        assert!(matches!(result, Err(RepositoryError::Validation(_))));
    }
}
