// SPDX-License-Identifier: Apache-2.0

//! Shared fixtures for the store tests.

use crate::{NewCustomer, NewOrder, NewOrderItem, NewProduct, NewUser, Store};
use gdsales_model::{Customer, OrderStatus, Product, ProductId};

pub(crate) fn new_product(name: &str, sku: &str, stock: i64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        category: "garments".to_string(),
        sku: sku.to_string(),
        description: None,
        price: 50.0,
        cost: 30.0,
        stock,
        min_stock: 5,
        max_stock: 500,
        unit: "piece".to_string(),
        status: "active".to_string(),
        image: None,
    }
}

pub(crate) async fn seed_product(store: &Store, name: &str, sku: &str, stock: i64) -> Product {
    store
        .create_product(new_product(name, sku, stock))
        .await
        .expect("seed product")
}

pub(crate) async fn seed_customer(store: &Store, name: &str) -> Customer {
    store
        .create_customer(NewCustomer {
            name: name.to_string(),
            contact: "Buyer".to_string(),
            phone: "+100000000".to_string(),
            email: None,
            address: "1 Factory Rd".to_string(),
            tax_number: None,
            credit_limit: 0.0,
            payment_terms: 30,
            customer_type: "retail".to_string(),
            status: "active".to_string(),
        })
        .await
        .expect("seed customer")
}

/// Builds a pending order for `customer` from `(product, quantity, price)`
/// lines; subtotal and total are the undiscounted line sum.
pub(crate) fn new_order(customer: &Customer, lines: &[(&Product, i64, f64)]) -> NewOrder {
    let items: Vec<NewOrderItem> = lines
        .iter()
        .map(|(product, quantity, price)| NewOrderItem {
            product_id: product.id.as_str().to_string(),
            quantity: *quantity,
            price: *price,
            total: None,
        })
        .collect();
    let subtotal: f64 = lines
        .iter()
        .map(|(_, quantity, price)| *quantity as f64 * price)
        .sum();
    NewOrder {
        customer_id: customer.id.as_str().to_string(),
        order_date: "2026-08-01".to_string(),
        delivery_date: "2026-08-10".to_string(),
        items,
        subtotal,
        discount: 0.0,
        tax: 0.0,
        total: subtotal,
        status: OrderStatus::Pending,
        notes: None,
    }
}

pub(crate) fn new_user(name: &str, email: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password_hash: "test-hash".to_string(),
        role: "sales".to_string(),
        department: "sales".to_string(),
        phone: None,
        status: "active".to_string(),
        permissions: vec!["sales".to_string()],
    }
}

/// Sum of signed movement quantities for one product, straight off the
/// ledger table. Tests compare this against `products.stock`.
pub(crate) async fn ledger_sum(store: &Store, product_id: &ProductId) -> i64 {
    let conn = store.lock().await;
    conn.query_row(
        "SELECT COALESCE(SUM(CASE WHEN movement_type = 'in' THEN quantity \
                                  ELSE -quantity END), 0) \
         FROM inventory_movements WHERE product_id = ?1",
        rusqlite::params![product_id.as_str()],
        |row| row.get(0),
    )
    .expect("ledger sum")
}
