// SPDX-License-Identifier: Apache-2.0

pub(crate) mod customers;
pub(crate) mod inventory;
pub(crate) mod orders;
pub(crate) mod products;
pub(crate) mod reports;
pub(crate) mod sessions;
pub(crate) mod settings;
pub(crate) mod system;
pub(crate) mod users;

use gdsales_api::ApiError;
use gdsales_store::StoreError;

/// Single mapping point from store failures to the wire contract. Sqlite
/// faults stay opaque to callers; the detail goes to the logs only.
pub(crate) fn into_api_error(err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound(entity) => ApiError::not_found(format!("{entity} not found")),
        StoreError::Conflict(message) => ApiError::conflict(message),
        StoreError::InsufficientStock { product_name } => {
            ApiError::validation(format!("Insufficient stock for product: {product_name}"))
        }
        StoreError::Validation(message) => ApiError::validation(message),
        StoreError::Sqlite(err) => {
            tracing::error!(error = %err, "store query failed");
            ApiError::internal()
        }
    }
}
