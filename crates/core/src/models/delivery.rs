//! Delivery fee records.

use serde::{Deserialize, Serialize};

use crate::types::{DeliveryFeeId, Money};

/// Flat delivery fee charged for one neighborhood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFee {
    pub id: DeliveryFeeId,
    pub neighborhood: String,
    pub fee: Money,
}
