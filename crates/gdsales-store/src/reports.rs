// SPDX-License-Identifier: Apache-2.0

//! Read-only aggregation for the dashboard and the three report endpoints.
//! Everything here is plain SELECTs; nothing in this module writes.

use crate::error::StoreError;
use crate::rows;
use crate::Store;
use gdsales_model::reports::{
    CustomerCounts, CustomerReport, CustomerSummary, DashboardReport, InventoryReport,
    InventorySummary, InventoryValue, MonthlySales, ProductCounts, RecentActivity, SalesReport,
    SalesReportOrder, SalesSummary, SalesTotals,
};
use rusqlite::types::Value;
use rusqlite::params_from_iter;

#[derive(Debug, Clone, Default)]
pub struct SalesReportFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub customer_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InventoryReportFilter {
    pub category: Option<String>,
    pub low_stock_only: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CustomerReportFilter {
    pub customer_type: Option<String>,
}

impl Store {
    pub async fn dashboard_report(&self) -> Result<DashboardReport, StoreError> {
        let conn = self.lock().await;

        let sales = conn.query_row(
            "SELECT COUNT(*) AS total_orders, COALESCE(SUM(total), 0) AS total_sales \
             FROM sales_orders",
            [],
            |row| {
                Ok(SalesTotals {
                    total_orders: row.get("total_orders")?,
                    total_sales: row.get("total_sales")?,
                })
            },
        )?;

        let products = conn.query_row(
            "SELECT COUNT(*) AS total_products, \
                    COUNT(CASE WHEN status = 'active' THEN 1 END) AS active_products \
             FROM products",
            [],
            |row| {
                Ok(ProductCounts {
                    total_products: row.get("total_products")?,
                    active_products: row.get("active_products")?,
                })
            },
        )?;

        let customers = conn.query_row(
            "SELECT COUNT(*) AS total_customers, \
                    COUNT(CASE WHEN status = 'active' THEN 1 END) AS active_customers \
             FROM customers",
            [],
            |row| {
                Ok(CustomerCounts {
                    total_customers: row.get("total_customers")?,
                    active_customers: row.get("active_customers")?,
                })
            },
        )?;

        let inventory = conn.query_row(
            "SELECT COALESCE(SUM(stock * price), 0) AS inventory_value, \
                    COUNT(CASE WHEN stock <= min_stock THEN 1 END) AS low_stock_items \
             FROM products WHERE status = 'active'",
            [],
            |row| {
                Ok(InventoryValue {
                    inventory_value: row.get("inventory_value")?,
                    low_stock_items: row.get("low_stock_items")?,
                })
            },
        )?;

        let mut stmt = conn.prepare(
            "SELECT strftime('%Y-%m', order_date) AS month, \
                    COALESCE(SUM(total), 0) AS sales \
             FROM sales_orders \
             WHERE order_date >= date('now', '-6 months') \
             GROUP BY strftime('%Y-%m', order_date) \
             ORDER BY month DESC LIMIT 6",
        )?;
        let monthly_sales = stmt
            .query_map([], |row| {
                Ok(MonthlySales {
                    month: row.get("month")?,
                    sales: row.get("sales")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare(
            "SELECT 'sales_order' AS type, id AS reference, customer_name AS description, \
                    total AS amount, created_at \
             FROM sales_orders \
             UNION ALL \
             SELECT 'inventory_movement' AS type, reference, \
                    product_name || ' - ' || movement_type AS description, \
                    quantity AS amount, created_at \
             FROM inventory_movements \
             ORDER BY created_at DESC LIMIT 10",
        )?;
        let recent_activities = stmt
            .query_map([], |row| {
                Ok(RecentActivity {
                    r#type: row.get("type")?,
                    reference: row.get("reference")?,
                    description: row.get("description")?,
                    amount: row.get("amount")?,
                    created_at: row.get("created_at")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(DashboardReport {
            sales,
            products,
            customers,
            inventory,
            monthly_sales,
            recent_activities,
        })
    }

    pub async fn sales_report(
        &self,
        filter: &SalesReportFilter,
    ) -> Result<SalesReport, StoreError> {
        let conn = self.lock().await;

        let mut clauses = String::new();
        let mut params: Vec<Value> = Vec::new();
        if let Some(start) = &filter.start_date {
            clauses.push_str(" AND so.order_date >= ?");
            params.push(Value::Text(start.clone()));
        }
        if let Some(end) = &filter.end_date {
            clauses.push_str(" AND so.order_date <= ?");
            params.push(Value::Text(end.clone()));
        }
        if let Some(customer_id) = &filter.customer_id {
            clauses.push_str(" AND so.customer_id = ?");
            params.push(Value::Text(customer_id.clone()));
        }

        let sql = format!(
            "SELECT {}, c.customer_type FROM sales_orders so \
             LEFT JOIN customers c ON so.customer_id = c.id \
             WHERE 1=1{clauses} ORDER BY so.order_date DESC, so.rowid DESC",
            rows::ORDER_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let orders = stmt
            .query_map(params_from_iter(params.clone()), |row| {
                Ok(SalesReportOrder {
                    order: rows::order_from_row(row)?,
                    customer_type: row.get("customer_type")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let summary_sql = format!(
            "SELECT COUNT(*) AS total_orders, \
                    COALESCE(SUM(subtotal), 0) AS total_subtotal, \
                    COALESCE(SUM(discount), 0) AS total_discount, \
                    COALESCE(SUM(tax), 0) AS total_tax, \
                    COALESCE(SUM(total), 0) AS total_amount \
             FROM sales_orders so WHERE 1=1{clauses}"
        );
        let summary = conn.query_row(&summary_sql, params_from_iter(params), |row| {
            Ok(SalesSummary {
                total_orders: row.get("total_orders")?,
                total_subtotal: row.get("total_subtotal")?,
                total_discount: row.get("total_discount")?,
                total_tax: row.get("total_tax")?,
                total_amount: row.get("total_amount")?,
            })
        })?;

        Ok(SalesReport { orders, summary })
    }

    pub async fn inventory_report(
        &self,
        filter: &InventoryReportFilter,
    ) -> Result<InventoryReport, StoreError> {
        let conn = self.lock().await;

        let mut sql = String::from("SELECT * FROM products WHERE status = 'active'");
        let mut params: Vec<Value> = Vec::new();
        if let Some(category) = &filter.category {
            sql.push_str(" AND category = ?");
            params.push(Value::Text(category.clone()));
        }
        if filter.low_stock_only {
            sql.push_str(" AND stock <= min_stock");
        }
        sql.push_str(" ORDER BY category, name");
        let mut stmt = conn.prepare(&sql)?;
        let products = stmt
            .query_map(params_from_iter(params), rows::product_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        // Summary ignores the low-stock toggle, matching the report's header
        // panel which always shows whole-category numbers.
        let mut summary_sql = String::from(
            "SELECT COUNT(*) AS total_products, \
                    COALESCE(SUM(stock), 0) AS total_quantity, \
                    COALESCE(SUM(stock * price), 0) AS total_value, \
                    COALESCE(SUM(stock * cost), 0) AS total_cost, \
                    COUNT(CASE WHEN stock <= min_stock THEN 1 END) AS low_stock_count \
             FROM products WHERE status = 'active'",
        );
        let mut summary_params: Vec<Value> = Vec::new();
        if let Some(category) = &filter.category {
            summary_sql.push_str(" AND category = ?");
            summary_params.push(Value::Text(category.clone()));
        }
        let summary = conn.query_row(&summary_sql, params_from_iter(summary_params), |row| {
            Ok(InventorySummary {
                total_products: row.get("total_products")?,
                total_quantity: row.get("total_quantity")?,
                total_value: row.get("total_value")?,
                total_cost: row.get("total_cost")?,
                low_stock_count: row.get("low_stock_count")?,
            })
        })?;

        Ok(InventoryReport { products, summary })
    }

    pub async fn customer_report(
        &self,
        filter: &CustomerReportFilter,
    ) -> Result<CustomerReport, StoreError> {
        let conn = self.lock().await;

        let mut sql = String::from("SELECT * FROM customers WHERE 1=1");
        let mut params: Vec<Value> = Vec::new();
        if let Some(customer_type) = &filter.customer_type {
            sql.push_str(" AND customer_type = ?");
            params.push(Value::Text(customer_type.clone()));
        }
        sql.push_str(" ORDER BY total_spent DESC");
        let mut stmt = conn.prepare(&sql)?;
        let customers = stmt
            .query_map(params_from_iter(params.clone()), rows::customer_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut summary_sql = String::from(
            "SELECT COUNT(*) AS total_customers, \
                    COUNT(CASE WHEN status = 'active' THEN 1 END) AS active_customers, \
                    COALESCE(SUM(total_spent), 0) AS total_revenue, \
                    COALESCE(AVG(total_spent), 0) AS average_spent \
             FROM customers WHERE 1=1",
        );
        if filter.customer_type.is_some() {
            summary_sql.push_str(" AND customer_type = ?");
        }
        let summary = conn.query_row(&summary_sql, params_from_iter(params), |row| {
            Ok(CustomerSummary {
                total_customers: row.get("total_customers")?,
                active_customers: row.get("active_customers")?,
                total_revenue: row.get("total_revenue")?,
                average_spent: row.get("average_spent")?,
            })
        })?;

        Ok(CustomerReport { customers, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_support::{new_order, seed_customer, seed_product};

    #[tokio::test]
    async fn dashboard_reflects_orders_and_movements() {
        let store = Store::open_in_memory().expect("open store");
        let customer = seed_customer(&store, "Acme Garments").await;
        let product = seed_product(&store, "Shirt", "SH-001", 100).await;
        store
            .place_order(new_order(&customer, &[(&product, 10, 50.0)]))
            .await
            .expect("place order");

        let dashboard = store.dashboard_report().await.expect("dashboard");
        assert_eq!(dashboard.sales.total_orders, 1);
        assert_eq!(dashboard.sales.total_sales, 500.0);
        assert_eq!(dashboard.products.total_products, 1);
        assert_eq!(dashboard.customers.active_customers, 1);
        // 90 left in stock at 50.0 each.
        assert_eq!(dashboard.inventory.inventory_value, 4500.0);
        // One order row plus INITIAL_STOCK and the sale's out movement.
        assert_eq!(dashboard.recent_activities.len(), 3);
    }

    #[tokio::test]
    async fn sales_report_filters_by_date_window() {
        let store = Store::open_in_memory().expect("open store");
        let customer = seed_customer(&store, "Acme Garments").await;
        let product = seed_product(&store, "Shirt", "SH-001", 100).await;
        store
            .place_order(new_order(&customer, &[(&product, 2, 50.0)]))
            .await
            .expect("place order");

        let inside = store
            .sales_report(&SalesReportFilter {
                start_date: Some("2026-01-01".to_string()),
                ..SalesReportFilter::default()
            })
            .await
            .expect("report");
        assert_eq!(inside.orders.len(), 1);
        assert_eq!(inside.summary.total_amount, 100.0);
        assert_eq!(inside.orders[0].customer_type.as_deref(), Some("retail"));

        let outside = store
            .sales_report(&SalesReportFilter {
                end_date: Some("2000-01-01".to_string()),
                ..SalesReportFilter::default()
            })
            .await
            .expect("report");
        assert!(outside.orders.is_empty());
        assert_eq!(outside.summary.total_orders, 0);
    }

    #[tokio::test]
    async fn inventory_report_low_stock_toggle_filters_rows_not_summary() {
        let store = Store::open_in_memory().expect("open store");
        seed_product(&store, "Shirt", "SH-001", 100).await;
        seed_product(&store, "Dress", "DR-001", 0).await;

        let report = store
            .inventory_report(&InventoryReportFilter {
                low_stock_only: true,
                ..InventoryReportFilter::default()
            })
            .await
            .expect("report");
        assert_eq!(report.products.len(), 1);
        assert_eq!(report.products[0].name, "Dress");
        assert_eq!(report.summary.total_products, 2);
        assert_eq!(report.summary.low_stock_count, 1);
    }

    #[tokio::test]
    async fn customer_report_orders_by_spend() {
        let store = Store::open_in_memory().expect("open store");
        let low = seed_customer(&store, "Acme Garments").await;
        let high = seed_customer(&store, "Bolt Textiles").await;
        let product = seed_product(&store, "Shirt", "SH-001", 100).await;
        store
            .place_order(new_order(&low, &[(&product, 1, 10.0)]))
            .await
            .expect("small order");
        store
            .place_order(new_order(&high, &[(&product, 5, 10.0)]))
            .await
            .expect("large order");

        let report = store
            .customer_report(&CustomerReportFilter::default())
            .await
            .expect("report");
        assert_eq!(report.customers[0].name, "Bolt Textiles");
        assert_eq!(report.summary.total_customers, 2);
        assert_eq!(report.summary.total_revenue, 60.0);
        assert_eq!(report.summary.average_spent, 30.0);
    }
}
