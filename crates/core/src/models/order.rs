//! Order records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{CartItem, subtotal};
use crate::types::{Money, OrderId, OrderStatus, PaymentMethod};

/// Delivery address captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAddress {
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// Customer data captured per order; not stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub address: CustomerAddress,
}

/// A placed order.
///
/// `items` is a snapshot of the cart at checkout; later menu price changes
/// do not affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub date: DateTime<Utc>,
    pub customer: Customer,
    pub items: Vec<CartItem>,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub delivery_fee: Money,
}

impl Order {
    /// Items subtotal, complements included.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        subtotal(&self.items)
    }

    /// Amount due: items subtotal plus the delivery fee.
    #[must_use]
    pub fn total(&self) -> Money {
        self.subtotal() + self.delivery_fee
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{Complement, Product};
    use crate::types::{ComplementId, ProductId};

    fn line(price_cents: i64, quantity: u32, complement_cents: &[i64]) -> CartItem {
        CartItem {
            product: Product {
                id: ProductId::new("1"),
                name: "X-Burger Especial".to_string(),
                description: String::new(),
                price: Money::from_cents(price_cents),
                image: None,
                ingredients: Vec::new(),
                category_id: None,
            },
            quantity,
            selected_complements: complement_cents
                .iter()
                .enumerate()
                .map(|(i, cents)| Complement {
                    id: ComplementId::new(i.to_string()),
                    name: format!("extra {i}"),
                    price: Money::from_cents(*cents),
                    product_id: None,
                })
                .collect(),
        }
    }

    fn customer() -> Customer {
        Customer {
            name: "João Silva".to_string(),
            phone: "(11) 98765-4321".to_string(),
            address: CustomerAddress {
                street: "Rua das Flores".to_string(),
                number: "123".to_string(),
                neighborhood: "Jardim Primavera".to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
            },
        }
    }

    #[test]
    fn test_total_includes_complements_and_fee() {
        let order = Order {
            id: OrderId::new("1001"),
            date: Utc::now(),
            customer: customer(),
            items: vec![line(2590, 2, &[350]), line(1290, 1, &[])],
            status: OrderStatus::Delivered,
            payment_method: PaymentMethod::CreditCard,
            delivery_fee: Money::from_cents(500),
        };

        // (25.90 + 3.50) * 2 + 12.90 = 71.70
        assert_eq!(order.subtotal(), Money::from_cents(7170));
        assert_eq!(order.total(), Money::from_cents(7670));
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn test_item_count_saturates() {
        let order = Order {
            id: OrderId::new("1003"),
            date: Utc::now(),
            customer: customer(),
            items: vec![line(100, u32::MAX, &[]), line(100, 5, &[])],
            status: OrderStatus::Pending,
            payment_method: PaymentMethod::Cash,
            delivery_fee: Money::ZERO,
        };

        assert_eq!(order.item_count(), u32::MAX);
    }

    #[test]
    fn test_order_date_round_trips() {
        let json = r#"{
            "id": "1002",
            "date": "2025-05-09T12:45:00.000Z",
            "customer": {
                "name": "Maria Oliveira",
                "phone": "(11) 91234-5678",
                "address": {
                    "street": "Avenida Paulista",
                    "number": "1500",
                    "neighborhood": "Bela Vista",
                    "city": "São Paulo",
                    "state": "SP"
                }
            },
            "items": [],
            "status": "Pendente",
            "paymentMethod": "Dinheiro",
            "deliveryFee": 8
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.date.to_rfc3339(), "2025-05-09T12:45:00+00:00");

        let reparsed: Order = serde_json::from_str(&serde_json::to_string(&order).unwrap()).unwrap();
        assert_eq!(reparsed, order);
    }
}
