// SPDX-License-Identifier: Apache-2.0

//! SQLite-backed store for the gdsales backend.
//!
//! A single connection behind an async mutex serves all requests; every
//! multi-statement business operation (order placement, order cancellation,
//! manual inventory movements, product creation/update with stock changes)
//! runs inside one `rusqlite::Transaction`, so a failing sub-step rolls the
//! whole operation back and the stock ledger invariant holds: for every
//! product, `stock` equals the sum of its signed movement quantities.

#![forbid(unsafe_code)]

mod customers;
mod error;
mod inventory;
mod orders;
mod products;
mod reports;
mod rows;
pub mod schema;
mod settings;
#[cfg(test)]
mod tests_support;
mod users;

pub use customers::{CustomerFilter, CustomerPatch, NewCustomer};
pub use error::StoreError;
pub use inventory::{MovementFilter, NewMovement};
pub use orders::{NewOrder, NewOrderItem, OrderFilter};
pub use products::{NewProduct, ProductFilter, ProductPatch};
pub use reports::{CustomerReportFilter, InventoryReportFilter, SalesReportFilter};
pub use users::{NewUser, UserCredentials, UserPatch};

use rusqlite::Connection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

pub const CRATE_NAME: &str = "gdsales-store";

pub struct Store {
    conn: Mutex<Connection>,
    order_seq: AtomicU64,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        tracing::info!(path = %path.display(), "opening sqlite store");
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        schema::init(&conn)?;
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(1);
        Ok(Self {
            conn: Mutex::new(conn),
            order_seq: AtomicU64::new(seed),
        })
    }

    pub(crate) async fn lock(&self) -> tokio::sync::MutexGuard<'_, Connection> {
        self.conn.lock().await
    }

    /// Order ids keep the legacy `SO-` + six digit shape. The counter is
    /// seeded from the clock, which wraps modulo the id space, so callers
    /// must be prepared to skip ids that are already taken.
    pub(crate) fn next_order_id(&self) -> String {
        let n = self.order_seq.fetch_add(1, Ordering::Relaxed);
        format!("SO-{:06}", n % 1_000_000)
    }

    /// Seeds the bootstrap admin account. A no-op when the email is taken.
    pub async fn ensure_admin(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<(), StoreError> {
        let conn = self.lock().await;
        conn.execute(
            "INSERT OR IGNORE INTO users (id, name, email, password, role, department, permissions)
             VALUES ('admin-001', ?1, ?2, ?3, 'admin', 'it', '[\"all\"]')",
            rusqlite::params![name, email, password_hash],
        )?;
        Ok(())
    }

    pub(crate) fn new_row_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn order_ids_are_unique_and_shaped() {
        let store = Store::open_in_memory().expect("open store");
        let a = store.next_order_id();
        let b = store.next_order_id();
        assert_ne!(a, b);
        assert!(a.starts_with("SO-") && a.len() == 9, "unexpected id: {a}");
    }

    #[tokio::test]
    async fn ensure_admin_is_idempotent() {
        let store = Store::open_in_memory().expect("open store");
        store
            .ensure_admin("Admin", "admin@gdsales.test", "hash")
            .await
            .expect("seed admin");
        store
            .ensure_admin("Admin", "admin@gdsales.test", "other-hash")
            .await
            .expect("second seed is a no-op");
        let users = store.list_users().await.expect("list users");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, "admin");
    }
}
