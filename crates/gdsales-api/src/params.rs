// SPDX-License-Identifier: Apache-2.0

//! Optional query filters accepted by the list and report endpoints.

use serde::Deserialize;

pub const DEFAULT_MOVEMENT_LIMIT: i64 = 50;
pub const MAX_MOVEMENT_LIMIT: i64 = 500;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListParams {
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerListParams {
    pub search: Option<String>,
    pub customer_type: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderListParams {
    pub customer_id: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovementListParams {
    pub product_id: Option<String>,
    pub movement_type: Option<String>,
    pub limit: Option<i64>,
}

impl MovementListParams {
    #[must_use]
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_MOVEMENT_LIMIT)
            .clamp(1, MAX_MOVEMENT_LIMIT)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalesReportParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub customer_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryReportParams {
    pub category: Option<String>,
    pub low_stock_only: Option<String>,
}

impl InventoryReportParams {
    #[must_use]
    pub fn low_stock_only(&self) -> bool {
        self.low_stock_only.as_deref() == Some("true")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerReportParams {
    pub customer_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_limit_defaults_and_clamps() {
        assert_eq!(
            MovementListParams::default().effective_limit(),
            DEFAULT_MOVEMENT_LIMIT
        );
        let params = MovementListParams {
            limit: Some(10_000),
            ..MovementListParams::default()
        };
        assert_eq!(params.effective_limit(), MAX_MOVEMENT_LIMIT);
        let params = MovementListParams {
            limit: Some(0),
            ..MovementListParams::default()
        };
        assert_eq!(params.effective_limit(), 1);
    }
}
