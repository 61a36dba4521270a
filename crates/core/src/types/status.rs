//! Status enums for orders.

use serde::{Deserialize, Serialize};

/// Order fulfillment status.
///
/// Labels are the Portuguese strings shown to staff and stored in the
/// `orders` blob. The variants read as a progression, but any status may be
/// set at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Pendente")]
    Pending,
    #[serde(rename = "Em preparo")]
    Preparing,
    #[serde(rename = "Saiu para entrega")]
    OutForDelivery,
    #[serde(rename = "Entregue")]
    Delivered,
}

impl OrderStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Preparing,
        Self::OutForDelivery,
        Self::Delivered,
    ];

    /// The stored/display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Preparing => "Em preparo",
            Self::OutForDelivery => "Saiu para entrega",
            Self::Delivered => "Entregue",
        }
    }

    /// Orders still in the kitchen (shown on the dashboard).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Preparing)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| format!("invalid order status: {s}"))
    }
}

/// Payment method chosen at checkout (paid on delivery).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "Dinheiro")]
    Cash,
    #[serde(rename = "Cartão de Crédito")]
    CreditCard,
    #[serde(rename = "Cartão de Débito")]
    DebitCard,
    #[serde(rename = "Pix")]
    Pix,
}

impl PaymentMethod {
    /// The stored/display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Dinheiro",
            Self::CreditCard => "Cartão de Crédito",
            Self::DebitCard => "Cartão de Débito",
            Self::Pix => "Pix",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
