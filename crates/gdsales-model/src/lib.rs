// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod customer;
pub mod ids;
pub mod movement;
pub mod order;
pub mod product;
pub mod reports;
pub mod settings;
pub mod user;

pub use customer::Customer;
pub use ids::{CustomerId, OrderId, ParseError, ProductId, Sku, UserId};
pub use movement::{InventoryMovement, MovementType};
pub use order::{OrderStatus, SalesOrder, SalesOrderItem};
pub use product::Product;
pub use settings::SystemSetting;
pub use user::{User, ADMIN_ROLE};

pub const CRATE_NAME: &str = "gdsales-model";
