// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

/// Store failure taxonomy. `NotFound`, `Conflict`, `InsufficientStock` and
/// `Validation` carry messages safe to surface to API clients; `Sqlite` is an
/// internal fault and must stay opaque on the wire.
#[derive(Debug)]
pub enum StoreError {
    NotFound(&'static str),
    Conflict(String),
    InsufficientStock { product_name: String },
    Validation(String),
    Sqlite(rusqlite::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(entity) => write!(f, "{entity} not found"),
            Self::Conflict(msg) | Self::Validation(msg) => f.write_str(msg),
            Self::InsufficientStock { product_name } => {
                write!(f, "Insufficient stock for product: {product_name}")
            }
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Sqlite(err)
    }
}
