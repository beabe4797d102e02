// SPDX-License-Identifier: Apache-2.0

use crate::ids::{ParseError, ProductId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A single recorded change to a product's stock quantity. Movements are
/// append-only; the current `products.stock` value for a product must always
/// equal the sum of its signed movement quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    In,
    Out,
    Transfer,
    Adjustment,
}

impl MovementType {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        match input {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "transfer" => Ok(Self::Transfer),
            "adjustment" => Ok(Self::Adjustment),
            other => Err(ParseError::UnknownLabel("movement_type", other.to_string())),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Transfer => "transfer",
            Self::Adjustment => "adjustment",
        }
    }

    /// Only `in` movements add stock; every other type removes it.
    #[must_use]
    pub const fn decreases_stock(self) -> bool {
        !matches!(self, Self::In)
    }

    #[must_use]
    pub const fn signed_delta(self, quantity: i64) -> i64 {
        if self.decreases_stock() {
            -quantity
        } else {
            quantity
        }
    }
}

impl Display for MovementType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryMovement {
    pub id: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub movement_type: MovementType,
    pub quantity: i64,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_type_labels_round_trip() {
        for label in ["in", "out", "transfer", "adjustment"] {
            let parsed = MovementType::parse(label).expect("known label");
            assert_eq!(parsed.as_str(), label);
            let json = serde_json::to_string(&parsed).expect("serialize");
            assert_eq!(json, format!("\"{label}\""));
        }
        assert!(MovementType::parse("restock").is_err());
    }

    #[test]
    fn signed_delta_matches_stock_direction() {
        assert_eq!(MovementType::In.signed_delta(5), 5);
        assert_eq!(MovementType::Out.signed_delta(5), -5);
        assert_eq!(MovementType::Transfer.signed_delta(3), -3);
        assert_eq!(MovementType::Adjustment.signed_delta(2), -2);
        assert!(!MovementType::In.decreases_stock());
        assert!(MovementType::Out.decreases_stock());
    }
}
