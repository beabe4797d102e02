// SPDX-License-Identifier: Apache-2.0

use crate::ids::CustomerId;
use serde::{Deserialize, Serialize};

/// `total_orders` and `total_spent` are running aggregates over the customer's
/// non-deleted sales orders. They are only ever mutated inside the same
/// transaction that creates or cancels an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub contact: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub tax_number: Option<String>,
    pub credit_limit: f64,
    pub payment_terms: i64,
    pub customer_type: String,
    pub status: String,
    pub total_orders: i64,
    pub total_spent: f64,
    pub created_at: String,
    pub updated_at: String,
}
