//! Delivery-fee registry: a flat fee per neighborhood.

use serde::Deserialize;

use foodexpress_core::{DeliveryFee, DeliveryFeeId, Money};

use super::store::Store;
use super::{BlobKey, RepositoryError};

/// Fields accepted when registering a neighborhood.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFeeInput {
    pub neighborhood: String,
    pub fee: Money,
}

/// Repository for delivery fees.
pub struct DeliveryFeeRepository<'a> {
    store: &'a Store,
}

impl<'a> DeliveryFeeRepository<'a> {
    /// Create a new delivery-fee repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<DeliveryFee> {
        self.store.read().await.delivery_fees.clone()
    }

    pub async fn get(&self, id: &DeliveryFeeId) -> Option<DeliveryFee> {
        self.store
            .read()
            .await
            .delivery_fees
            .iter()
            .find(|f| &f.id == id)
            .cloned()
    }

    /// Fee for an exact neighborhood name.
    pub async fn for_neighborhood(&self, neighborhood: &str) -> Option<DeliveryFee> {
        self.store
            .read()
            .await
            .delivery_fees
            .iter()
            .find(|f| f.neighborhood == neighborhood)
            .cloned()
    }

    /// Register a neighborhood.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the neighborhood is blank or
    /// the fee is negative.
    pub async fn add(&self, input: DeliveryFeeInput) -> Result<DeliveryFee, RepositoryError> {
        let neighborhood = input.neighborhood.trim().to_string();
        if neighborhood.is_empty() {
            return Err(RepositoryError::Validation(
                "neighborhood is required".to_string(),
            ));
        }
        let fee = DeliveryFee {
            id: DeliveryFeeId::generate(),
            neighborhood,
            fee: validate_fee(input.fee)?,
        };

        let mut data = self.store.write().await;
        data.delivery_fees.push(fee.clone());
        self.store.persist(&data, &[BlobKey::DeliveryFees]);

        tracing::info!(fee_id = %fee.id, neighborhood = %fee.neighborhood, fee = %fee.fee, "Delivery fee created");
        Ok(fee)
    }

    /// Change the fee of an existing entry; the neighborhood name is kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` or `RepositoryError::Validation`.
    pub async fn update_fee(
        &self,
        id: &DeliveryFeeId,
        fee: Money,
    ) -> Result<DeliveryFee, RepositoryError> {
        let fee = validate_fee(fee)?;

        let mut data = self.store.write().await;
        let entry = data
            .delivery_fees
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("delivery fee {id}")))?;
        entry.fee = fee;
        let updated = entry.clone();
        self.store.persist(&data, &[BlobKey::DeliveryFees]);

        tracing::info!(fee_id = %id, fee = %fee, "Delivery fee updated");
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the entry does not exist.
    pub async fn delete(&self, id: &DeliveryFeeId) -> Result<DeliveryFee, RepositoryError> {
        let mut data = self.store.write().await;
        let index = data
            .delivery_fees
            .iter()
            .position(|f| &f.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("delivery fee {id}")))?;
        let removed = data.delivery_fees.remove(index);
        self.store.persist(&data, &[BlobKey::DeliveryFees]);

        tracing::info!(fee_id = %id, "Delivery fee deleted");
        Ok(removed)
    }
}

fn validate_fee(fee: Money) -> Result<Money, RepositoryError> {
    if fee.is_negative() {
        return Err(RepositoryError::Validation(
            "fee must not be negative".to_string(),
        ));
    }
    Ok(fee)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_by_neighborhood_is_exact() {
        let store = Store::in_memory();
        let fees = DeliveryFeeRepository::new(&store);

        let centro = fees.for_neighborhood("Centro").await.unwrap();
        assert_eq!(centro.fee, Money::from_cents(500));
        assert!(fees.for_neighborhood("centro").await.is_none());
    }

    #[tokio::test]
    async fn test_update_changes_fee_only() {
        let store = Store::in_memory();
        let fees = DeliveryFeeRepository::new(&store);
        let id = DeliveryFeeId::new("3");

        let updated = fees.update_fee(&id, Money::from_cents(950)).await.unwrap();

        assert_eq!(updated.neighborhood, "Bela Vista");
        assert_eq!(fees.get(&id).await.unwrap().fee, Money::from_cents(950));
    }

    #[tokio::test]
    async fn test_add_and_delete() {
        let store = Store::in_memory();
        let fees = DeliveryFeeRepository::new(&store);

        let added = fees
            .add(DeliveryFeeInput {
                neighborhood: " Moema ".to_string(),
                fee: Money::from_cents(1200),
            })
            .await
            .unwrap();
        assert_eq!(added.neighborhood, "Moema");
        assert_eq!(fees.list().await.len(), 4);

        fees.delete(&added.id).await.unwrap();
        assert!(fees.get(&added.id).await.is_none());
        assert!(matches!(
            fees.delete(&added.id).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_negative_fee_is_rejected() {
        let store = Store::in_memory();
        let fees = DeliveryFeeRepository::new(&store);

        let result = fees
            .update_fee(&DeliveryFeeId::new("1"), Money::from_cents(-100))
            .await;
        assert!(matches!(result, Err(RepositoryError::Validation(_))));
    }
}
