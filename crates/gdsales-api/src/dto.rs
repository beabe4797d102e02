// SPDX-License-Identifier: Apache-2.0

//! Request bodies for the mutating endpoints. Every field arrives optional so
//! that missing-field validation can answer with the envelope's 400 shape
//! instead of a deserializer rejection; `validate` enforces the required set.

use crate::errors::ApiError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn missing(fields: &[(&str, bool)]) -> Option<ApiError> {
    if fields.iter().any(|(_, present)| !present) {
        let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        return Some(ApiError::validation(format!(
            "Required fields: {}",
            names.join(", ")
        )));
    }
    None
}

fn valid_date(value: &str, field: &str) -> Result<(), ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ApiError::validation(format!("Invalid date for {field}: {value}")))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProductRequest {
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

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(err) = missing(&[
            ("name", self.name.is_some()),
            ("category", self.category.is_some()),
            ("sku", self.sku.is_some()),
            ("price", self.price.is_some()),
            ("cost", self.cost.is_some()),
        ]) {
            return Err(err);
        }
        if self.stock.is_some_and(|s| s < 0) {
            return Err(ApiError::validation("Stock must not be negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductRequest {
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

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.stock.is_some_and(|s| s < 0) {
            return Err(ApiError::validation("Stock must not be negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
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

impl CreateCustomerRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        match missing(&[
            ("name", self.name.is_some()),
            ("contact", self.contact.is_some()),
            ("phone", self.phone.is_some()),
            ("address", self.address.is_some()),
        ]) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCustomerRequest {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: i64,
    pub price: f64,
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: Option<String>,
    pub order_date: Option<String>,
    pub delivery_date: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
    pub subtotal: Option<f64>,
    pub discount: Option<f64>,
    pub tax: Option<f64>,
    pub total: Option<f64>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl CreateOrderRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.customer_id.is_none()
            || self.order_date.is_none()
            || self.delivery_date.is_none()
            || self.items.is_empty()
        {
            return Err(ApiError::validation(
                "Required fields: customer_id, order_date, delivery_date, items",
            ));
        }
        if let Some(date) = self.order_date.as_deref() {
            valid_date(date, "order_date")?;
        }
        if let Some(date) = self.delivery_date.as_deref() {
            valid_date(date, "delivery_date")?;
        }
        for item in &self.items {
            if item.quantity <= 0 {
                return Err(ApiError::validation(format!(
                    "Quantity must be positive for product: {}",
                    item.product_id
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: Option<String>,
}

impl UpdateOrderStatusRequest {
    pub fn validate(&self) -> Result<&str, ApiError> {
        self.status
            .as_deref()
            .ok_or_else(|| ApiError::validation("Status is required"))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMovementRequest {
    pub product_id: Option<String>,
    pub movement_type: Option<String>,
    pub quantity: Option<i64>,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

impl CreateMovementRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(err) = missing(&[
            ("product_id", self.product_id.is_some()),
            ("movement_type", self.movement_type.is_some()),
            ("quantity", self.quantity.is_some()),
        ]) {
            return Err(err);
        }
        if self.quantity.is_some_and(|q| q <= 0) {
            return Err(ApiError::validation("Quantity must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub permissions: Option<Vec<String>>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        match missing(&[
            ("name", self.name.is_some()),
            ("email", self.email.is_some()),
            ("password", self.password.is_some()),
            ("role", self.role.is_some()),
            ("department", self.department.is_some()),
        ]) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    pub permissions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(&str, &str), ApiError> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(ApiError::validation("Required fields: email, password")),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpsertSettingRequest {
    pub key: Option<String>,
    pub value: Option<String>,
    pub description: Option<String>,
}

impl UpsertSettingRequest {
    pub fn validate(&self) -> Result<(&str, &str), ApiError> {
        match (self.key.as_deref(), self.value.as_deref()) {
            (Some(key), Some(value)) if !key.is_empty() => Ok((key, value)),
            _ => Err(ApiError::validation("Required fields: key, value")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_product_lists_the_required_fields() {
        let err = CreateProductRequest::default().validate().expect_err("400");
        assert_eq!(
            err.message,
            "Required fields: name, category, sku, price, cost"
        );
    }

    #[test]
    fn create_order_rejects_empty_items_and_bad_dates() {
        let mut req = CreateOrderRequest {
            customer_id: Some("c1".into()),
            order_date: Some("2026-08-01".into()),
            delivery_date: Some("2026-08-10".into()),
            ..CreateOrderRequest::default()
        };
        assert!(req.validate().is_err());

        req.items.push(OrderItemRequest {
            product_id: "p1".into(),
            quantity: 2,
            price: 10.0,
            total: Some(20.0),
        });
        assert!(req.validate().is_ok());

        req.order_date = Some("01/08/2026".into());
        assert!(req.validate().is_err());
    }

    #[test]
    fn order_items_require_positive_quantity() {
        let req = CreateOrderRequest {
            customer_id: Some("c1".into()),
            order_date: Some("2026-08-01".into()),
            delivery_date: Some("2026-08-10".into()),
            items: vec![OrderItemRequest {
                product_id: "p1".into(),
                quantity: 0,
                price: 10.0,
                total: None,
            }],
            ..CreateOrderRequest::default()
        };
        assert!(req.validate().is_err());
    }
}
