// SPDX-License-Identifier: Apache-2.0

//! Read-only aggregate shapes returned by the dashboard and report endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesTotals {
    pub total_orders: i64,
    pub total_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCounts {
    pub total_products: i64,
    pub active_products: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCounts {
    pub total_customers: i64,
    pub active_customers: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryValue {
    pub inventory_value: f64,
    pub low_stock_items: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    pub month: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub r#type: String,
    pub reference: Option<String>,
    pub description: String,
    pub amount: f64,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub sales: SalesTotals,
    pub products: ProductCounts,
    pub customers: CustomerCounts,
    pub inventory: InventoryValue,
    pub monthly_sales: Vec<MonthlySales>,
    pub recent_activities: Vec<RecentActivity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_orders: i64,
    pub total_subtotal: f64,
    pub total_discount: f64,
    pub total_tax: f64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryOverview {
    pub total_products: i64,
    pub total_quantity: i64,
    pub total_value: f64,
    pub low_stock_items: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_products: i64,
    pub total_quantity: i64,
    pub total_value: f64,
    pub total_cost: f64,
    pub low_stock_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInventory {
    pub category: String,
    pub product_count: i64,
    pub total_quantity: i64,
    pub total_value: f64,
}

/// A sales order row as it appears inside the sales report: the order plus
/// the customer's type joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReportOrder {
    #[serde(flatten)]
    pub order: crate::SalesOrder,
    pub customer_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    pub orders: Vec<SalesReportOrder>,
    pub summary: SalesSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryReport {
    pub products: Vec<crate::Product>,
    pub summary: InventorySummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerReport {
    pub customers: Vec<crate::Customer>,
    pub summary: CustomerSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub total_customers: i64,
    pub active_customers: i64,
    pub total_revenue: f64,
    pub average_spent: f64,
}
