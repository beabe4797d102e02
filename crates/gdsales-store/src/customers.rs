// SPDX-License-Identifier: Apache-2.0

use crate::error::StoreError;
use crate::rows;
use crate::Store;
use gdsales_model::Customer;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, OptionalExtension};

#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
    pub search: Option<String>,
    pub customer_type: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCustomer {
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
}

#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub tax_number: Option<String>,
    pub credit_limit: Option<f64>,
    pub payment_terms: Option<i64>,
    pub customer_type: Option<String>,
    pub status: Option<String>,
}

impl Store {
    pub async fn list_customers(
        &self,
        filter: &CustomerFilter,
    ) -> Result<Vec<Customer>, StoreError> {
        let conn = self.lock().await;
        let mut sql = String::from("SELECT * FROM customers WHERE 1=1");
        let mut params: Vec<Value> = Vec::new();
        if let Some(search) = &filter.search {
            sql.push_str(" AND (name LIKE ? OR contact LIKE ? OR phone LIKE ? OR email LIKE ?)");
            let pattern = format!("%{search}%");
            for _ in 0..4 {
                params.push(Value::Text(pattern.clone()));
            }
        }
        if let Some(customer_type) = &filter.customer_type {
            sql.push_str(" AND customer_type = ?");
            params.push(Value::Text(customer_type.clone()));
        }
        if let Some(status) = &filter.status {
            sql.push_str(" AND status = ?");
            params.push(Value::Text(status.clone()));
        }
        sql.push_str(" ORDER BY created_at DESC, rowid DESC");
        let mut stmt = conn.prepare(&sql)?;
        let customers = stmt
            .query_map(params_from_iter(params), rows::customer_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(customers)
    }

    pub async fn get_customer(&self, id: &str) -> Result<Customer, StoreError> {
        let conn = self.lock().await;
        rows::fetch_customer(&conn, id)?.ok_or(StoreError::NotFound("Customer"))
    }

    pub async fn create_customer(&self, new: NewCustomer) -> Result<Customer, StoreError> {
        let conn = self.lock().await;
        let id = Store::new_row_id();
        conn.execute(
            "INSERT INTO customers \
             (id, name, contact, phone, email, address, tax_number, \
              credit_limit, payment_terms, customer_type, status) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            rusqlite::params![
                id,
                new.name,
                new.contact,
                new.phone,
                new.email,
                new.address,
                new.tax_number,
                new.credit_limit,
                new.payment_terms,
                new.customer_type,
                new.status
            ],
        )?;
        rows::fetch_customer(&conn, &id)?.ok_or(StoreError::NotFound("Customer"))
    }

    pub async fn update_customer(
        &self,
        id: &str,
        patch: CustomerPatch,
    ) -> Result<Customer, StoreError> {
        let conn = self.lock().await;
        let exists: Option<String> = conn
            .query_row(
                "SELECT id FROM customers WHERE id = ?1",
                rusqlite::params![id],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(StoreError::NotFound("Customer"));
        }
        let mut sets: Vec<&str> = Vec::new();
        let mut params: Vec<Value> = Vec::new();
        if let Some(v) = &patch.name {
            sets.push("name = ?");
            params.push(Value::Text(v.clone()));
        }
        if let Some(v) = &patch.contact {
            sets.push("contact = ?");
            params.push(Value::Text(v.clone()));
        }
        if let Some(v) = &patch.phone {
            sets.push("phone = ?");
            params.push(Value::Text(v.clone()));
        }
        if let Some(v) = &patch.email {
            sets.push("email = ?");
            params.push(Value::Text(v.clone()));
        }
        if let Some(v) = &patch.address {
            sets.push("address = ?");
            params.push(Value::Text(v.clone()));
        }
        if let Some(v) = &patch.tax_number {
            sets.push("tax_number = ?");
            params.push(Value::Text(v.clone()));
        }
        if let Some(v) = patch.credit_limit {
            sets.push("credit_limit = ?");
            params.push(Value::Real(v));
        }
        if let Some(v) = patch.payment_terms {
            sets.push("payment_terms = ?");
            params.push(Value::Integer(v));
        }
        if let Some(v) = &patch.customer_type {
            sets.push("customer_type = ?");
            params.push(Value::Text(v.clone()));
        }
        if let Some(v) = &patch.status {
            sets.push("status = ?");
            params.push(Value::Text(v.clone()));
        }
        sets.push("updated_at = CURRENT_TIMESTAMP");
        params.push(Value::Text(id.to_string()));
        let sql = format!("UPDATE customers SET {} WHERE id = ?", sets.join(", "));
        conn.execute(&sql, params_from_iter(params))?;
        rows::fetch_customer(&conn, id)?.ok_or(StoreError::NotFound("Customer"))
    }

    /// Customers with order history cannot be deleted; cancel or reassign the
    /// orders first.
    pub async fn delete_customer(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.lock().await;
        let exists: Option<String> = conn
            .query_row(
                "SELECT id FROM customers WHERE id = ?1",
                rusqlite::params![id],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(StoreError::NotFound("Customer"));
        }
        let has_orders: Option<String> = conn
            .query_row(
                "SELECT id FROM sales_orders WHERE customer_id = ?1 LIMIT 1",
                rusqlite::params![id],
                |row| row.get(0),
            )
            .optional()?;
        if has_orders.is_some() {
            return Err(StoreError::Conflict(
                "Cannot delete customer with existing orders".to_string(),
            ));
        }
        conn.execute("DELETE FROM customers WHERE id = ?1", rusqlite::params![id])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_support::{new_order, seed_customer, seed_product};

    #[tokio::test]
    async fn crud_round_trip() {
        let store = Store::open_in_memory().expect("open store");
        let customer = seed_customer(&store, "Acme Garments").await;
        assert_eq!(customer.total_orders, 0);

        let updated = store
            .update_customer(
                customer.id.as_str(),
                CustomerPatch {
                    phone: Some("+100200300".to_string()),
                    ..CustomerPatch::default()
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.phone, "+100200300");
        assert_eq!(updated.name, "Acme Garments");

        store
            .delete_customer(customer.id.as_str())
            .await
            .expect("delete");
        let err = store
            .get_customer(customer.id.as_str())
            .await
            .expect_err("gone");
        assert!(matches!(err, StoreError::NotFound("Customer")));
    }

    #[tokio::test]
    async fn delete_refuses_customers_with_orders() {
        let store = Store::open_in_memory().expect("open store");
        let customer = seed_customer(&store, "Acme Garments").await;
        let product = seed_product(&store, "Shirt", "SH-001", 50).await;
        store
            .place_order(new_order(&customer, &[(&product, 5, 10.0)]))
            .await
            .expect("place order");
        let err = store
            .delete_customer(customer.id.as_str())
            .await
            .expect_err("has orders");
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn search_spans_contact_fields() {
        let store = Store::open_in_memory().expect("open store");
        seed_customer(&store, "Acme Garments").await;
        seed_customer(&store, "Bolt Textiles").await;
        let hits = store
            .list_customers(&CustomerFilter {
                search: Some("Bolt".to_string()),
                ..CustomerFilter::default()
            })
            .await
            .expect("search");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Bolt Textiles");
    }
}
