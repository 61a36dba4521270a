//! Order repository: checkout, listing and status changes.

use chrono::Utc;
use serde::Serialize;

use foodexpress_core::{Customer, Money, Order, OrderId, OrderStatus, PaymentMethod};

use super::store::Store;
use super::{BlobKey, RepositoryError};

/// Aggregate figures over all orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub count: usize,
    /// Sum of order totals, complements and delivery fees included.
    pub revenue: Money,
    pub by_status: Vec<StatusCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: usize,
}

/// Repository for order operations.
pub struct OrderRepository<'a> {
    store: &'a Store,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All orders, newest first. Orders with the same timestamp keep
    /// reverse insertion order.
    pub async fn list(&self) -> Vec<Order> {
        let mut orders = self.store.read().await.orders.clone();
        orders.reverse();
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        orders
    }

    pub async fn get(&self, id: &OrderId) -> Option<Order> {
        self.store
            .read()
            .await
            .orders
            .iter()
            .find(|o| &o.id == id)
            .cloned()
    }

    /// Up to `limit` orders still in the kitchen, newest first.
    pub async fn active(&self, limit: usize) -> Vec<Order> {
        self.list()
            .await
            .into_iter()
            .filter(|o| o.status.is_active())
            .take(limit)
            .collect()
    }

    pub async fn stats(&self) -> OrderStats {
        let data = self.store.read().await;
        let by_status = OrderStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: data.orders.iter().filter(|o| o.status == status).count(),
            })
            .collect();

        OrderStats {
            count: data.orders.len(),
            revenue: data.orders.iter().map(Order::total).sum(),
            by_status,
        }
    }

    /// Turn the current cart into a `Pendente` order and empty the cart.
    ///
    /// Returns `None` and creates nothing when the cart is empty. The order
    /// id is `1001 + number of existing orders`; cart lines are copied as
    /// they are, without re-pricing against the menu.
    pub async fn place(
        &self,
        customer: Customer,
        payment_method: PaymentMethod,
        delivery_fee: Money,
    ) -> Option<Order> {
        let mut data = self.store.write().await;
        if data.cart.is_empty() {
            return None;
        }

        let order = Order {
            id: OrderId::sequential(data.orders.len()),
            date: Utc::now(),
            customer,
            items: data.cart.take(),
            status: OrderStatus::Pending,
            payment_method,
            delivery_fee,
        };
        data.orders.push(order.clone());
        self.store.persist(&data, &[BlobKey::Orders, BlobKey::Cart]);

        tracing::info!(
            order_id = %order.id,
            items = order.item_count(),
            total = %order.total(),
            payment_method = %order.payment_method,
            "Order placed"
        );
        Some(order)
    }

    /// Overwrite an order's status. Any status may follow any other.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut data = self.store.write().await;
        let order = data
            .orders
            .iter_mut()
            .find(|o| &o.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("order {id}")))?;
        let previous = order.status;
        order.status = status;
        let updated = order.clone();
        self.store.persist(&data, &[BlobKey::Orders]);

        tracing::info!(order_id = %id, from = %previous, to = %status, "Order status updated");
        Ok(updated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use foodexpress_core::{CustomerAddress, ProductId};

    use super::*;
    use crate::db::CartRepository;

    fn customer() -> Customer {
        Customer {
            name: "Ana".to_string(),
            phone: "(11) 90000-0000".to_string(),
            address: CustomerAddress {
                street: "Rua A".to_string(),
                number: "1".to_string(),
                neighborhood: "Centro".to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_empty_cart_places_nothing() {
        let store = Store::in_memory();
        let orders = OrderRepository::new(&store);

        let placed = orders
            .place(customer(), PaymentMethod::Pix, Money::from_cents(500))
            .await;

        assert!(placed.is_none());
        assert_eq!(orders.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_place_order_clears_cart_and_numbers_sequentially() {
        let store = Store::in_memory();
        let orders = OrderRepository::new(&store);
        let cart = CartRepository::new(&store);

        cart.add(&ProductId::new("4"), &[]).await.unwrap();
        let first = orders
            .place(customer(), PaymentMethod::Pix, Money::from_cents(500))
            .await
            .unwrap();

        assert_eq!(first.id.as_str(), "1003");
        assert_eq!(first.status, OrderStatus::Pending);
        assert_eq!(first.total(), Money::from_cents(1790));
        assert!(cart.get().await.is_empty());

        cart.add(&ProductId::new("5"), &[]).await.unwrap();
        let second = orders
            .place(customer(), PaymentMethod::Cash, Money::ZERO)
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(orders.list().await.first().unwrap().id, second.id);
    }

    #[tokio::test]
    async fn test_update_status_is_unconditional() {
        let store = Store::in_memory();
        let orders = OrderRepository::new(&store);
        let id = OrderId::new("1001");

        let updated = orders.update_status(&id, OrderStatus::Preparing).await.unwrap();
        assert_eq!(updated.status, OrderStatus::Preparing);

        orders.update_status(&id, OrderStatus::Delivered).await.unwrap();
        let reopened = orders.update_status(&id, OrderStatus::Pending).await.unwrap();
        assert_eq!(reopened.status, OrderStatus::Pending);
        assert_eq!(orders.get(&id).await.unwrap().status, OrderStatus::Pending);

        let result = orders
            .update_status(&OrderId::new("9999"), OrderStatus::Delivered)
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_stats_and_active_orders() {
        let store = Store::in_memory();
        let orders = OrderRepository::new(&store);

        let stats = orders.stats().await;
        assert_eq!(stats.count, 2);
        assert_eq!(stats.revenue, Money::from_cents(13060));
        assert_eq!(
            stats.by_status.first().copied(),
            Some(StatusCount {
                status: OrderStatus::Pending,
                count: 1
            })
        );

        let active = orders.active(5).await;
        assert_eq!(active.len(), 1);
        assert_eq!(active.first().unwrap().id.as_str(), "1002");
    }
}
