// SPDX-License-Identifier: Apache-2.0

use crate::error::StoreError;
use crate::rows;
use crate::Store;
use gdsales_model::{MovementType, Product};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, OptionalExtension};

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub sku: String,
    pub description: Option<String>,
    pub price: f64,
    pub cost: f64,
    pub stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    pub unit: String,
    pub status: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub cost: Option<f64>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub max_stock: Option<i64>,
    pub unit: Option<String>,
    pub status: Option<String>,
    pub image: Option<String>,
}

impl Store {
    pub async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let conn = self.lock().await;
        let mut sql = String::from("SELECT * FROM products WHERE 1=1");
        let mut params: Vec<Value> = Vec::new();
        if let Some(category) = &filter.category {
            sql.push_str(" AND category = ?");
            params.push(Value::Text(category.clone()));
        }
        if let Some(status) = &filter.status {
            sql.push_str(" AND status = ?");
            params.push(Value::Text(status.clone()));
        }
        if let Some(search) = &filter.search {
            sql.push_str(" AND (name LIKE ? OR sku LIKE ? OR description LIKE ?)");
            let pattern = format!("%{search}%");
            params.push(Value::Text(pattern.clone()));
            params.push(Value::Text(pattern.clone()));
            params.push(Value::Text(pattern));
        }
        sql.push_str(" ORDER BY created_at DESC, rowid DESC");
        let mut stmt = conn.prepare(&sql)?;
        let products = stmt
            .query_map(params_from_iter(params), rows::product_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(products)
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, StoreError> {
        let conn = self.lock().await;
        rows::fetch_product(&conn, id)?.ok_or(StoreError::NotFound("Product"))
    }

    /// Initial stock is ledgered in the same transaction as the insert, so a
    /// product is never born with unexplained stock.
    pub async fn create_product(&self, new: NewProduct) -> Result<Product, StoreError> {
        let mut conn = self.lock().await;
        let tx = conn.transaction()?;
        let duplicate: Option<String> = tx
            .query_row(
                "SELECT id FROM products WHERE sku = ?1",
                rusqlite::params![new.sku],
                |row| row.get(0),
            )
            .optional()?;
        if duplicate.is_some() {
            return Err(StoreError::Conflict("SKU already exists".to_string()));
        }
        let id = Store::new_row_id();
        tx.execute(
            "INSERT INTO products \
             (id, name, category, sku, description, price, cost, stock, \
              min_stock, max_stock, unit, status, image) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            rusqlite::params![
                id,
                new.name,
                new.category,
                new.sku,
                new.description,
                new.price,
                new.cost,
                new.stock,
                new.min_stock,
                new.max_stock,
                new.unit,
                new.status,
                new.image
            ],
        )?;
        if new.stock > 0 {
            rows::insert_movement(
                &tx,
                &id,
                &new.name,
                MovementType::In,
                new.stock,
                Some("INITIAL_STOCK"),
                Some("Initial stock entry"),
            )?;
        }
        let product = rows::fetch_product(&tx, &id)?.ok_or(StoreError::NotFound("Product"))?;
        tx.commit()?;
        Ok(product)
    }

    /// Partial update. A stock change appends a `STOCK_ADJUSTMENT` movement in
    /// the same transaction so the ledger keeps matching the counter.
    pub async fn update_product(
        &self,
        id: &str,
        patch: ProductPatch,
    ) -> Result<Product, StoreError> {
        let mut conn = self.lock().await;
        let tx = conn.transaction()?;
        let existing = rows::fetch_product(&tx, id)?.ok_or(StoreError::NotFound("Product"))?;

        if let Some(sku) = &patch.sku {
            if sku != existing.sku.as_str() {
                let taken: Option<String> = tx
                    .query_row(
                        "SELECT id FROM products WHERE sku = ?1 AND id != ?2",
                        rusqlite::params![sku, id],
                        |row| row.get(0),
                    )
                    .optional()?;
                if taken.is_some() {
                    return Err(StoreError::Conflict("SKU already exists".to_string()));
                }
            }
        }

        let mut sets: Vec<&str> = Vec::new();
        let mut params: Vec<Value> = Vec::new();
        let mut push_text = |sets: &mut Vec<&str>, params: &mut Vec<Value>, clause, value: &str| {
            sets.push(clause);
            params.push(Value::Text(value.to_string()));
        };
        if let Some(v) = &patch.name {
            push_text(&mut sets, &mut params, "name = ?", v);
        }
        if let Some(v) = &patch.category {
            push_text(&mut sets, &mut params, "category = ?", v);
        }
        if let Some(v) = &patch.sku {
            push_text(&mut sets, &mut params, "sku = ?", v);
        }
        if let Some(v) = &patch.description {
            push_text(&mut sets, &mut params, "description = ?", v);
        }
        if let Some(v) = patch.price {
            sets.push("price = ?");
            params.push(Value::Real(v));
        }
        if let Some(v) = patch.cost {
            sets.push("cost = ?");
            params.push(Value::Real(v));
        }
        if let Some(v) = patch.stock {
            sets.push("stock = ?");
            params.push(Value::Integer(v));
        }
        if let Some(v) = patch.min_stock {
            sets.push("min_stock = ?");
            params.push(Value::Integer(v));
        }
        if let Some(v) = patch.max_stock {
            sets.push("max_stock = ?");
            params.push(Value::Integer(v));
        }
        if let Some(v) = &patch.unit {
            push_text(&mut sets, &mut params, "unit = ?", v);
        }
        if let Some(v) = &patch.status {
            push_text(&mut sets, &mut params, "status = ?", v);
        }
        if let Some(v) = &patch.image {
            push_text(&mut sets, &mut params, "image = ?", v);
        }
        sets.push("updated_at = CURRENT_TIMESTAMP");
        params.push(Value::Text(id.to_string()));
        let sql = format!("UPDATE products SET {} WHERE id = ?", sets.join(", "));
        tx.execute(&sql, params_from_iter(params))?;

        if let Some(stock) = patch.stock {
            if stock != existing.stock {
                let difference = stock - existing.stock;
                let movement_type = if difference > 0 {
                    MovementType::In
                } else {
                    MovementType::Out
                };
                rows::insert_movement(
                    &tx,
                    id,
                    patch.name.as_deref().unwrap_or(&existing.name),
                    movement_type,
                    difference.abs(),
                    Some("STOCK_ADJUSTMENT"),
                    Some("Stock adjustment via product update"),
                )?;
            }
        }

        let product = rows::fetch_product(&tx, id)?.ok_or(StoreError::NotFound("Product"))?;
        tx.commit()?;
        Ok(product)
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.lock().await;
        let exists: Option<String> = conn
            .query_row(
                "SELECT id FROM products WHERE id = ?1",
                rusqlite::params![id],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(StoreError::NotFound("Product"));
        }
        let referenced: Option<String> = conn
            .query_row(
                "SELECT product_id FROM sales_order_items WHERE product_id = ?1 \
                 UNION SELECT product_id FROM inventory_movements WHERE product_id = ?1 \
                 LIMIT 1",
                rusqlite::params![id],
                |row| row.get(0),
            )
            .optional()?;
        if referenced.is_some() {
            return Err(StoreError::Conflict(
                "Cannot delete product with recorded orders or movements".to_string(),
            ));
        }
        conn.execute("DELETE FROM products WHERE id = ?1", rusqlite::params![id])?;
        Ok(())
    }

    pub async fn list_categories(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.lock().await;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT category FROM products WHERE category IS NOT NULL ORDER BY category",
        )?;
        let categories = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(categories)
    }
}
