// SPDX-License-Identifier: Apache-2.0

use crate::ids::{CustomerId, OrderId, ParseError, ProductId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Free-form order lifecycle label. Only the five known values are accepted,
/// but no transition table is enforced: any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        match input {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ParseError::UnknownLabel("status", other.to_string())),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of a sales order. `product_name` and `price` are snapshots taken
/// at order time so history survives later catalog edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderItem {
    pub id: String,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub order_date: String,
    pub delivery_date: String,
    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub items: Vec<SalesOrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_accepts_only_known_labels() {
        for label in ["pending", "confirmed", "shipped", "delivered", "cancelled"] {
            assert_eq!(OrderStatus::parse(label).expect("known").as_str(), label);
        }
        assert!(OrderStatus::parse("returned").is_err());
        assert!(OrderStatus::parse("Pending").is_err());
    }
}
