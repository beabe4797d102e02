// SPDX-License-Identifier: Apache-2.0

use crate::ids::{ProductId, Sku};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub sku: Sku,
    pub description: Option<String>,
    pub price: f64,
    pub cost: f64,
    pub stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    pub unit: String,
    pub status: String,
    pub image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

