// SPDX-License-Identifier: Apache-2.0

use crate::error::StoreError;
use crate::rows;
use crate::Store;
use gdsales_model::reports::{CategoryInventory, InventoryOverview};
use gdsales_model::{InventoryMovement, MovementType, Product};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, OptionalExtension};

#[derive(Debug, Clone, Default)]
pub struct MovementFilter {
    pub product_id: Option<String>,
    pub movement_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMovement {
    pub product_id: String,
    pub movement_type: MovementType,
    pub quantity: i64,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

impl Store {
    pub async fn list_movements(
        &self,
        filter: &MovementFilter,
        limit: i64,
    ) -> Result<Vec<InventoryMovement>, StoreError> {
        let conn = self.lock().await;
        let mut sql = String::from("SELECT * FROM inventory_movements WHERE 1=1");
        let mut params: Vec<Value> = Vec::new();
        if let Some(product_id) = &filter.product_id {
            sql.push_str(" AND product_id = ?");
            params.push(Value::Text(product_id.clone()));
        }
        if let Some(movement_type) = &filter.movement_type {
            sql.push_str(" AND movement_type = ?");
            params.push(Value::Text(movement_type.clone()));
        }
        sql.push_str(" ORDER BY created_at DESC, rowid DESC LIMIT ?");
        params.push(Value::Integer(limit));
        let mut stmt = conn.prepare(&sql)?;
        let movements = stmt
            .query_map(params_from_iter(params), rows::movement_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(movements)
    }

    /// Records a manual stock movement. The ledger row and the stock delta are
    /// written in the same transaction; a decreasing movement that would push
    /// stock below zero is rejected without writing anything.
    pub async fn post_movement(&self, new: NewMovement) -> Result<InventoryMovement, StoreError> {
        let mut conn = self.lock().await;
        let tx = conn.transaction()?;

        let product: Option<(String, i64)> = tx
            .query_row(
                "SELECT name, stock FROM products WHERE id = ?1",
                rusqlite::params![new.product_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let Some((product_name, stock)) = product else {
            return Err(StoreError::NotFound("Product"));
        };

        let delta = new.movement_type.signed_delta(new.quantity);
        if delta < 0 && stock + delta < 0 {
            return Err(StoreError::InsufficientStock { product_name });
        }

        let movement_id = rows::insert_movement(
            &tx,
            &new.product_id,
            &product_name,
            new.movement_type,
            new.quantity,
            new.reference.as_deref(),
            new.notes.as_deref(),
        )?;
        tx.execute(
            "UPDATE products SET stock = stock + ?1, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?2",
            rusqlite::params![delta, new.product_id],
        )?;

        let movement = rows::fetch_movement(&tx, &movement_id)?
            .ok_or(StoreError::NotFound("Inventory movement"))?;
        tx.commit()?;
        Ok(movement)
    }

    pub async fn inventory_overview(&self) -> Result<InventoryOverview, StoreError> {
        let conn = self.lock().await;
        let overview = conn.query_row(
            "SELECT COUNT(*) AS total_products, \
                    COALESCE(SUM(stock), 0) AS total_quantity, \
                    COALESCE(SUM(stock * price), 0) AS total_value, \
                    COALESCE(SUM(CASE WHEN stock <= min_stock THEN 1 ELSE 0 END), 0) \
                        AS low_stock_items \
             FROM products WHERE status = 'active'",
            [],
            |row| {
                Ok(InventoryOverview {
                    total_products: row.get("total_products")?,
                    total_quantity: row.get("total_quantity")?,
                    total_value: row.get("total_value")?,
                    low_stock_items: row.get("low_stock_items")?,
                })
            },
        )?;
        Ok(overview)
    }

    pub async fn low_stock_products(&self) -> Result<Vec<Product>, StoreError> {
        let conn = self.lock().await;
        let mut stmt = conn.prepare(
            "SELECT * FROM products WHERE status = 'active' AND stock <= min_stock \
             ORDER BY stock ASC, rowid ASC",
        )?;
        let products = stmt
            .query_map([], rows::product_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(products)
    }

    pub async fn inventory_by_category(&self) -> Result<Vec<CategoryInventory>, StoreError> {
        let conn = self.lock().await;
        let mut stmt = conn.prepare(
            "SELECT category, COUNT(*) AS product_count, \
                    COALESCE(SUM(stock), 0) AS total_quantity, \
                    COALESCE(SUM(stock * price), 0) AS total_value \
             FROM products WHERE status = 'active' \
             GROUP BY category ORDER BY category",
        )?;
        let categories = stmt
            .query_map([], |row| {
                Ok(CategoryInventory {
                    category: row.get("category")?,
                    product_count: row.get("product_count")?,
                    total_quantity: row.get("total_quantity")?,
                    total_value: row.get("total_value")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_support::{ledger_sum, seed_product};

    #[tokio::test]
    async fn movements_keep_the_ledger_in_step_with_stock() {
        let store = Store::open_in_memory().expect("open store");
        let product = seed_product(&store, "Shirt", "SH-001", 20).await;

        store
            .post_movement(NewMovement {
                product_id: product.id.as_str().to_string(),
                movement_type: MovementType::In,
                quantity: 5,
                reference: Some("PO-1".to_string()),
                notes: None,
            })
            .await
            .expect("in movement");
        store
            .post_movement(NewMovement {
                product_id: product.id.as_str().to_string(),
                movement_type: MovementType::Out,
                quantity: 8,
                reference: None,
                notes: Some("damaged batch".to_string()),
            })
            .await
            .expect("out movement");

        let product = store.get_product(product.id.as_str()).await.expect("get");
        assert_eq!(product.stock, 17);
        assert_eq!(ledger_sum(&store, &product.id).await, 17);
    }

    #[tokio::test]
    async fn decreasing_movement_cannot_overdraw_stock() {
        let store = Store::open_in_memory().expect("open store");
        let product = seed_product(&store, "Shirt", "SH-001", 3).await;

        let err = store
            .post_movement(NewMovement {
                product_id: product.id.as_str().to_string(),
                movement_type: MovementType::Out,
                quantity: 4,
                reference: None,
                notes: None,
            })
            .await
            .expect_err("overdraw");
        assert!(matches!(err, StoreError::InsufficientStock { .. }));

        let product = store.get_product(product.id.as_str()).await.expect("get");
        assert_eq!(product.stock, 3);
        let movements = store
            .list_movements(&MovementFilter::default(), 50)
            .await
            .expect("movements");
        assert_eq!(movements.len(), 1, "only the INITIAL_STOCK row remains");
    }

    #[tokio::test]
    async fn movement_for_unknown_product_is_not_found() {
        let store = Store::open_in_memory().expect("open store");
        let err = store
            .post_movement(NewMovement {
                product_id: "missing".to_string(),
                movement_type: MovementType::In,
                quantity: 1,
                reference: None,
                notes: None,
            })
            .await
            .expect_err("unknown product");
        assert!(matches!(err, StoreError::NotFound("Product")));
    }

    #[tokio::test]
    async fn overview_and_by_category_aggregate_active_products() {
        let store = Store::open_in_memory().expect("open store");
        seed_product(&store, "Shirt", "SH-001", 10).await;
        seed_product(&store, "Dress", "DR-001", 0).await;

        let overview = store.inventory_overview().await.expect("overview");
        assert_eq!(overview.total_products, 2);
        assert_eq!(overview.total_quantity, 10);
        assert_eq!(overview.low_stock_items, 1);

        let low = store.low_stock_products().await.expect("low stock");
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Dress");

        let by_category = store.inventory_by_category().await.expect("by category");
        assert_eq!(by_category.len(), 1, "seeded products share one category");
        assert_eq!(by_category[0].product_count, 2);
    }
}
