//! Built-in menu, fee table and sample orders.
//!
//! Used whenever a blob has never been written, and by `fx-cli seed`.

use chrono::{TimeZone, Utc};

use foodexpress_core::{
    Cart, CartItem, Category, CategoryId, Complement, ComplementId, Customer, CustomerAddress,
    DeliveryFee, DeliveryFeeId, Money, Order, OrderId, OrderStatus, PaymentMethod, Product,
    ProductId,
};

fn category(id: &str, name: &str, description: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        description: Some(description.to_string()),
    }
}

fn complement(id: &str, name: &str, price_cents: i64, product_id: &str) -> Complement {
    Complement {
        id: ComplementId::new(id),
        name: name.to_string(),
        price: Money::from_cents(price_cents),
        product_id: Some(ProductId::new(product_id)),
    }
}

fn product(
    id: &str,
    name: &str,
    description: &str,
    price_cents: i64,
    label: &str,
    ingredients: &[&str],
    category_id: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        price: Money::from_cents(price_cents),
        image: Some(format!(
            "/placeholder.svg?height=200&width=200&text={label}"
        )),
        ingredients: ingredients.iter().map(|s| (*s).to_string()).collect(),
        category_id: Some(CategoryId::new(category_id)),
    }
}

fn fee(id: &str, neighborhood: &str, fee_cents: i64) -> DeliveryFee {
    DeliveryFee {
        id: DeliveryFeeId::new(id),
        neighborhood: neighborhood.to_string(),
        fee: Money::from_cents(fee_cents),
    }
}

#[must_use]
pub fn categories() -> Vec<Category> {
    vec![
        category("1", "Hambúrgueres", "Deliciosos hambúrgueres artesanais"),
        category(
            "2",
            "Pizzas",
            "Pizzas com massa fresca e ingredientes selecionados",
        ),
        category("3", "Bebidas", "Refrigerantes, sucos e outras bebidas"),
        category("4", "Porções", "Porções para compartilhar"),
        category("5", "Sobremesas", "Doces e sobremesas"),
    ]
}

#[must_use]
pub fn complements() -> Vec<Complement> {
    vec![
        complement("1", "Hambúrguer extra", 850, "1"),
        complement("2", "Queijo cheddar extra", 350, "1"),
        complement("3", "Bacon extra", 400, "1"),
        complement("4", "Borda recheada", 790, "2"),
        complement("5", "Molho extra", 250, "2"),
        complement("6", "Batata frita pequena", 890, "1"),
        complement("7", "Refrigerante lata", 590, "1"),
    ]
}

#[must_use]
pub fn products() -> Vec<Product> {
    vec![
        product(
            "1",
            "X-Burger Especial",
            "Hambúrguer artesanal com queijo, bacon, alface e tomate",
            2590,
            "X-Burger",
            &[
                "Pão brioche",
                "Hambúrguer 180g",
                "Queijo cheddar",
                "Bacon",
                "Alface",
                "Tomate",
                "Molho especial",
            ],
            "1",
        ),
        product(
            "2",
            "Pizza Margherita",
            "Molho de tomate, mussarela, manjericão fresco e azeite",
            4590,
            "Pizza",
            &[
                "Massa fresca",
                "Molho de tomate",
                "Mussarela",
                "Manjericão",
                "Azeite extra virgem",
            ],
            "2",
        ),
        product(
            "3",
            "Porção de Batata Frita",
            "Batatas fritas crocantes com molho especial da casa",
            1890,
            "Batata",
            &["Batata", "Sal", "Molho especial"],
            "4",
        ),
        product(
            "4",
            "Refrigerante 2L",
            "Coca-Cola, Guaraná ou Sprite",
            1290,
            "Refri",
            &[],
            "3",
        ),
        product(
            "5",
            "Açaí 500ml",
            "Açaí cremoso com granola, banana e leite condensado",
            2290,
            "Açaí",
            &["Açaí", "Granola", "Banana", "Leite condensado"],
            "5",
        ),
        product(
            "6",
            "Salada Caesar",
            "Alface, croutons, frango grelhado e molho caesar",
            2890,
            "Salada",
            &[
                "Alface",
                "Croutons",
                "Frango grelhado",
                "Molho caesar",
                "Queijo parmesão",
            ],
            "4",
        ),
    ]
}

#[must_use]
pub fn delivery_fees() -> Vec<DeliveryFee> {
    vec![
        fee("1", "Centro", 500),
        fee("2", "Jardim Primavera", 700),
        fee("3", "Bela Vista", 800),
    ]
}

#[must_use]
pub fn cart() -> Cart {
    Cart::new()
}

/// Two historical orders: one delivered, one pending.
#[must_use]
pub fn orders() -> Vec<Order> {
    let menu = products();
    let line = |index: usize, quantity: u32, selected_complements: Vec<Complement>| {
        menu.get(index).cloned().map(|product| CartItem {
            product,
            quantity,
            selected_complements,
        })
    };

    let cheddar = Complement {
        product_id: None,
        ..complement("2", "Queijo cheddar extra", 350, "1")
    };

    vec![
        Order {
            id: OrderId::new("1001"),
            date: Utc.with_ymd_and_hms(2025, 5, 8, 18, 30, 0).single().unwrap_or_default(),
            customer: Customer {
                name: "João Silva".to_string(),
                phone: "(11) 98765-4321".to_string(),
                address: CustomerAddress {
                    street: "Rua das Flores".to_string(),
                    number: "123".to_string(),
                    neighborhood: "Jardim Primavera".to_string(),
                    city: "São Paulo".to_string(),
                    state: "SP".to_string(),
                },
            },
            items: [line(0, 2, vec![cheddar]), line(3, 1, Vec::new())]
                .into_iter()
                .flatten()
                .collect(),
            status: OrderStatus::Delivered,
            payment_method: PaymentMethod::CreditCard,
            delivery_fee: Money::from_cents(500),
        },
        Order {
            id: OrderId::new("1002"),
            date: Utc.with_ymd_and_hms(2025, 5, 9, 12, 45, 0).single().unwrap_or_default(),
            customer: Customer {
                name: "Maria Oliveira".to_string(),
                phone: "(11) 91234-5678".to_string(),
                address: CustomerAddress {
                    street: "Avenida Paulista".to_string(),
                    number: "1500".to_string(),
                    neighborhood: "Bela Vista".to_string(),
                    city: "São Paulo".to_string(),
                    state: "SP".to_string(),
                },
            },
            items: line(1, 1, Vec::new()).into_iter().collect(),
            status: OrderStatus::Pending,
            payment_method: PaymentMethod::Cash,
            delivery_fee: Money::from_cents(800),
        },
    ]
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_references_are_consistent() {
        let categories = categories();
        let products = products();

        for product in &products {
            let category_id = product.category_id.as_ref();
            assert!(categories.iter().any(|c| Some(&c.id) == category_id));
        }
        for complement in complements() {
            assert!(products.iter().any(|p| Some(&p.id) == complement.product_id.as_ref()));
        }
    }

    #[test]
    fn test_seed_order_totals() {
        let orders = orders();
        assert_eq!(orders.len(), 2);

        // (25.90 + 3.50) * 2 + 12.90 + 5.00
        assert_eq!(orders[0].total(), Money::from_cents(7670));
        // 45.90 + 8.00
        assert_eq!(orders[1].total(), Money::from_cents(5390));
    }
}
