// SPDX-License-Identifier: Apache-2.0

//! Row-to-domain decoding. Stored ids and labels are validated on the way
//! out; a row that fails validation surfaces as a conversion error rather
//! than a panic.

use gdsales_model::{
    Customer, CustomerId, InventoryMovement, MovementType, OrderId, OrderStatus, Product,
    ProductId, SalesOrder, SalesOrderItem, Sku, User, UserId,
};
use rusqlite::types::Type;
use rusqlite::{Connection, Row};

fn bad_column<E>(err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err))
}

pub(crate) fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: ProductId::parse(&row.get::<_, String>("id")?).map_err(bad_column)?,
        name: row.get("name")?,
        category: row.get("category")?,
        sku: Sku::parse(&row.get::<_, String>("sku")?).map_err(bad_column)?,
        description: row.get("description")?,
        price: row.get("price")?,
        cost: row.get("cost")?,
        stock: row.get("stock")?,
        min_stock: row.get("min_stock")?,
        max_stock: row.get("max_stock")?,
        unit: row.get("unit")?,
        status: row.get("status")?,
        image: row.get("image")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub(crate) fn customer_from_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: CustomerId::parse(&row.get::<_, String>("id")?).map_err(bad_column)?,
        name: row.get("name")?,
        contact: row.get("contact")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        address: row.get("address")?,
        tax_number: row.get("tax_number")?,
        credit_limit: row.get("credit_limit")?,
        payment_terms: row.get("payment_terms")?,
        customer_type: row.get("customer_type")?,
        status: row.get("status")?,
        total_orders: row.get("total_orders")?,
        total_spent: row.get("total_spent")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub(crate) fn order_from_row(row: &Row<'_>) -> rusqlite::Result<SalesOrder> {
    Ok(SalesOrder {
        id: OrderId::parse(&row.get::<_, String>("id")?).map_err(bad_column)?,
        customer_id: CustomerId::parse(&row.get::<_, String>("customer_id")?)
            .map_err(bad_column)?,
        customer_name: row.get("customer_name")?,
        order_date: row.get("order_date")?,
        delivery_date: row.get("delivery_date")?,
        subtotal: row.get("subtotal")?,
        discount: row.get("discount")?,
        tax: row.get("tax")?,
        total: row.get("total")?,
        status: OrderStatus::parse(&row.get::<_, String>("status")?).map_err(bad_column)?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        items: Vec::new(),
    })
}

pub(crate) fn order_item_from_row(row: &Row<'_>) -> rusqlite::Result<SalesOrderItem> {
    Ok(SalesOrderItem {
        id: row.get("id")?,
        order_id: OrderId::parse(&row.get::<_, String>("order_id")?).map_err(bad_column)?,
        product_id: ProductId::parse(&row.get::<_, String>("product_id")?).map_err(bad_column)?,
        product_name: row.get("product_name")?,
        quantity: row.get("quantity")?,
        price: row.get("price")?,
        total: row.get("total")?,
        created_at: row.get("created_at")?,
    })
}

pub(crate) fn movement_from_row(row: &Row<'_>) -> rusqlite::Result<InventoryMovement> {
    Ok(InventoryMovement {
        id: row.get("id")?,
        product_id: ProductId::parse(&row.get::<_, String>("product_id")?).map_err(bad_column)?,
        product_name: row.get("product_name")?,
        movement_type: MovementType::parse(&row.get::<_, String>("movement_type")?)
            .map_err(bad_column)?,
        quantity: row.get("quantity")?,
        reference: row.get("reference")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    })
}

pub(crate) fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let permissions: Option<String> = row.get("permissions")?;
    Ok(User {
        id: UserId::parse(&row.get::<_, String>("id")?).map_err(bad_column)?,
        name: row.get("name")?,
        email: row.get("email")?,
        role: row.get("role")?,
        department: row.get("department")?,
        phone: row.get("phone")?,
        status: row.get("status")?,
        permissions: permissions
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default(),
        last_login: row.get("last_login")?,
        created_at: row.get("created_at")?,
    })
}

pub(crate) fn fetch_product(
    conn: &Connection,
    id: &str,
) -> rusqlite::Result<Option<Product>> {
    use rusqlite::OptionalExtension;
    conn.query_row(
        "SELECT * FROM products WHERE id = ?1",
        rusqlite::params![id],
        product_from_row,
    )
    .optional()
}

pub(crate) fn fetch_customer(
    conn: &Connection,
    id: &str,
) -> rusqlite::Result<Option<Customer>> {
    use rusqlite::OptionalExtension;
    conn.query_row(
        "SELECT * FROM customers WHERE id = ?1",
        rusqlite::params![id],
        customer_from_row,
    )
    .optional()
}

pub(crate) const ORDER_COLUMNS: &str = "so.id, so.customer_id, \
     COALESCE(c.name, so.customer_name) AS customer_name, so.order_date, \
     so.delivery_date, so.subtotal, so.discount, so.tax, so.total, so.status, \
     so.notes, so.created_at, so.updated_at";

pub(crate) fn fetch_order(conn: &Connection, id: &str) -> rusqlite::Result<Option<SalesOrder>> {
    use rusqlite::OptionalExtension;
    conn.query_row(
        &format!(
            "SELECT {ORDER_COLUMNS} FROM sales_orders so \
             LEFT JOIN customers c ON so.customer_id = c.id WHERE so.id = ?1"
        ),
        rusqlite::params![id],
        order_from_row,
    )
    .optional()
}

pub(crate) fn fetch_order_items(
    conn: &Connection,
    order_id: &str,
) -> rusqlite::Result<Vec<SalesOrderItem>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM sales_order_items WHERE order_id = ?1 ORDER BY rowid",
    )?;
    let items = stmt
        .query_map(rusqlite::params![order_id], order_item_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(items)
}

pub(crate) fn fetch_movement(
    conn: &Connection,
    id: &str,
) -> rusqlite::Result<Option<InventoryMovement>> {
    use rusqlite::OptionalExtension;
    conn.query_row(
        "SELECT * FROM inventory_movements WHERE id = ?1",
        rusqlite::params![id],
        movement_from_row,
    )
    .optional()
}

/// Appends one ledger row. Callers hold the transaction that also applies
/// the matching stock delta.
pub(crate) fn insert_movement(
    conn: &Connection,
    product_id: &str,
    product_name: &str,
    movement_type: MovementType,
    quantity: i64,
    reference: Option<&str>,
    notes: Option<&str>,
) -> rusqlite::Result<String> {
    let id = crate::Store::new_row_id();
    conn.execute(
        "INSERT INTO inventory_movements \
         (id, product_id, product_name, movement_type, quantity, reference, notes) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            id,
            product_id,
            product_name,
            movement_type.as_str(),
            quantity,
            reference,
            notes
        ],
    )?;
    Ok(id)
}
