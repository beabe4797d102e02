// SPDX-License-Identifier: Apache-2.0

//! Order placement and cancellation. These are the operations the rest of
//! the schema hangs off: `products.stock`, the movement ledger, and the
//! customer running aggregates must stay consistent with the set of live
//! orders, so every sub-step runs inside one transaction and a failure on
//! any line rolls the whole order back.

use crate::error::StoreError;
use crate::rows;
use crate::Store;
use gdsales_model::{MovementType, OrderStatus, SalesOrder};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, OptionalExtension};

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub customer_id: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: String,
    pub quantity: i64,
    pub price: f64,
    pub total: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: String,
    pub order_date: String,
    pub delivery_date: String,
    pub items: Vec<NewOrderItem>,
    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub notes: Option<String>,
}

impl Store {
    pub async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<SalesOrder>, StoreError> {
        let conn = self.lock().await;
        let mut sql = format!(
            "SELECT {} FROM sales_orders so \
             LEFT JOIN customers c ON so.customer_id = c.id WHERE 1=1",
            rows::ORDER_COLUMNS
        );
        let mut params: Vec<Value> = Vec::new();
        if let Some(customer_id) = &filter.customer_id {
            sql.push_str(" AND so.customer_id = ?");
            params.push(Value::Text(customer_id.clone()));
        }
        if let Some(status) = &filter.status {
            sql.push_str(" AND so.status = ?");
            params.push(Value::Text(status.clone()));
        }
        if let Some(search) = &filter.search {
            sql.push_str(" AND (so.id LIKE ? OR c.name LIKE ?)");
            let pattern = format!("%{search}%");
            params.push(Value::Text(pattern.clone()));
            params.push(Value::Text(pattern));
        }
        sql.push_str(" ORDER BY so.created_at DESC, so.rowid DESC");
        let mut stmt = conn.prepare(&sql)?;
        let mut orders = stmt
            .query_map(params_from_iter(params), rows::order_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        for order in &mut orders {
            order.items = rows::fetch_order_items(&conn, order.id.as_str())?;
        }
        Ok(orders)
    }

    pub async fn get_order(&self, id: &str) -> Result<SalesOrder, StoreError> {
        let conn = self.lock().await;
        let mut order = rows::fetch_order(&conn, id)?.ok_or(StoreError::NotFound("Sales order"))?;
        order.items = rows::fetch_order_items(&conn, id)?;
        Ok(order)
    }

    /// Places an order atomically. For every line: the product must exist and
    /// have sufficient stock; the item row, the stock decrement and the `out`
    /// movement are written together. The customer's aggregates move once,
    /// after all lines. Any failure aborts the entire placement.
    pub async fn place_order(&self, new: NewOrder) -> Result<SalesOrder, StoreError> {
        let mut conn = self.lock().await;
        let tx = conn.transaction()?;

        let customer_name: Option<String> = tx
            .query_row(
                "SELECT name FROM customers WHERE id = ?1",
                rusqlite::params![new.customer_id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(customer_name) = customer_name else {
            return Err(StoreError::Validation("Customer not found".to_string()));
        };

        // The counter can re-seed into an already issued range after a
        // restart; on a primary-key clash, step to the next value.
        let mut order_id = self.next_order_id();
        let mut attempts = 0;
        loop {
            let inserted = tx.execute(
                "INSERT INTO sales_orders \
                 (id, customer_id, customer_name, order_date, delivery_date, \
                  subtotal, discount, tax, total, status, notes) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                rusqlite::params![
                    order_id,
                    new.customer_id,
                    customer_name,
                    new.order_date,
                    new.delivery_date,
                    new.subtotal,
                    new.discount,
                    new.tax,
                    new.total,
                    new.status.as_str(),
                    new.notes
                ],
            );
            match inserted {
                Ok(_) => break,
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation && attempts < 8 =>
                {
                    attempts += 1;
                    order_id = self.next_order_id();
                }
                Err(e) => return Err(e.into()),
            }
        }

        for item in &new.items {
            let product: Option<(String, i64)> = tx
                .query_row(
                    "SELECT name, stock FROM products WHERE id = ?1",
                    rusqlite::params![item.product_id],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;
            let Some((product_name, stock)) = product else {
                return Err(StoreError::Validation(format!(
                    "Product not found: {}",
                    item.product_id
                )));
            };
            if stock < item.quantity {
                return Err(StoreError::InsufficientStock { product_name });
            }
            let item_total = item
                .total
                .unwrap_or(item.price * item.quantity as f64);
            tx.execute(
                "INSERT INTO sales_order_items \
                 (id, order_id, product_id, product_name, quantity, price, total) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    Store::new_row_id(),
                    order_id,
                    item.product_id,
                    product_name,
                    item.quantity,
                    item.price,
                    item_total
                ],
            )?;
            tx.execute(
                "UPDATE products SET stock = stock - ?1, updated_at = CURRENT_TIMESTAMP \
                 WHERE id = ?2",
                rusqlite::params![item.quantity, item.product_id],
            )?;
            rows::insert_movement(
                &tx,
                &item.product_id,
                &product_name,
                MovementType::Out,
                item.quantity,
                Some(&order_id),
                Some(&format!("Sales order: {order_id}")),
            )?;
        }

        tx.execute(
            "UPDATE customers SET total_orders = total_orders + 1, \
             total_spent = total_spent + ?1, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?2",
            rusqlite::params![new.total, new.customer_id],
        )?;

        let mut order =
            rows::fetch_order(&tx, &order_id)?.ok_or(StoreError::NotFound("Sales order"))?;
        order.items = rows::fetch_order_items(&tx, &order_id)?;
        tx.commit()?;
        tracing::debug!(order_id = %order_id, lines = order.items.len(), "order placed");
        Ok(order)
    }

    /// Exactly reverses a placement: per item the stock is re-credited and an
    /// `in` movement tagged `CANCEL-<order>` is appended, then the customer
    /// aggregates are rolled back and the order is deleted (items cascade).
    pub async fn cancel_order(&self, id: &str) -> Result<(), StoreError> {
        let mut conn = self.lock().await;
        let tx = conn.transaction()?;

        let order = rows::fetch_order(&tx, id)?.ok_or(StoreError::NotFound("Sales order"))?;
        let items = rows::fetch_order_items(&tx, id)?;

        for item in &items {
            tx.execute(
                "UPDATE products SET stock = stock + ?1, updated_at = CURRENT_TIMESTAMP \
                 WHERE id = ?2",
                rusqlite::params![item.quantity, item.product_id.as_str()],
            )?;
            rows::insert_movement(
                &tx,
                item.product_id.as_str(),
                &item.product_name,
                MovementType::In,
                item.quantity,
                Some(&format!("CANCEL-{id}")),
                Some(&format!("Cancelled sales order: {id}")),
            )?;
        }

        tx.execute(
            "UPDATE customers SET total_orders = total_orders - 1, \
             total_spent = total_spent - ?1, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?2",
            rusqlite::params![order.total, order.customer_id.as_str()],
        )?;
        tx.execute("DELETE FROM sales_orders WHERE id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        tracing::debug!(order_id = %id, lines = items.len(), "order cancelled");
        Ok(())
    }

    /// Status is a free label; any of the five known values may follow any
    /// other.
    pub async fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
    ) -> Result<SalesOrder, StoreError> {
        let conn = self.lock().await;
        let exists: Option<String> = conn
            .query_row(
                "SELECT id FROM sales_orders WHERE id = ?1",
                rusqlite::params![id],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(StoreError::NotFound("Sales order"));
        }
        conn.execute(
            "UPDATE sales_orders SET status = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2",
            rusqlite::params![status.as_str(), id],
        )?;
        let mut order = rows::fetch_order(&conn, id)?.ok_or(StoreError::NotFound("Sales order"))?;
        order.items = rows::fetch_order_items(&conn, id)?;
        Ok(order)
    }
}
