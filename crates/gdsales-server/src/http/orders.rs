// SPDX-License-Identifier: Apache-2.0

use crate::http::into_api_error;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use gdsales_api::params::OrderListParams;
use gdsales_api::{
    created, ok_data, ok_data_message, ok_message, ApiError, CreateOrderRequest,
    UpdateOrderStatusRequest,
};
use gdsales_model::OrderStatus;
use gdsales_store::{NewOrder, NewOrderItem, OrderFilter};

pub(crate) async fn list_orders_handler(
    State(state): State<AppState>,
    Query(params): Query<OrderListParams>,
) -> Result<Response, ApiError> {
    let filter = OrderFilter {
        customer_id: params.customer_id,
        status: params.status,
        search: params.search,
    };
    let orders = state
        .store
        .list_orders(&filter)
        .await
        .map_err(into_api_error)?;
    Ok(ok_data(orders))
}

pub(crate) async fn get_order_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let order = state.store.get_order(&id).await.map_err(into_api_error)?;
    Ok(ok_data(order))
}

pub(crate) async fn create_order_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<Response, ApiError> {
    body.validate()?;
    let status = match body.status.as_deref() {
        Some(label) => OrderStatus::parse(label)
            .map_err(|_| ApiError::validation(format!("Invalid status: {label}")))?,
        None => OrderStatus::Pending,
    };
    let items: Vec<NewOrderItem> = body
        .items
        .iter()
        .map(|item| NewOrderItem {
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            price: item.price,
            total: item.total,
        })
        .collect();
    let line_sum: f64 = items
        .iter()
        .map(|item| item.total.unwrap_or(item.price * item.quantity as f64))
        .sum();
    let subtotal = body.subtotal.unwrap_or(line_sum);
    let discount = body.discount.unwrap_or(0.0);
    let tax = body.tax.unwrap_or(0.0);
    let total = body.total.unwrap_or(subtotal - discount + tax);
    let new = NewOrder {
        customer_id: body.customer_id.unwrap_or_default(),
        order_date: body.order_date.unwrap_or_default(),
        delivery_date: body.delivery_date.unwrap_or_default(),
        items,
        subtotal,
        discount,
        tax,
        total,
        status,
        notes: body.notes,
    };
    let order = state.store.place_order(new).await.map_err(into_api_error)?;
    Ok(created("Sales order created successfully", order))
}

pub(crate) async fn update_order_status_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateOrderStatusRequest>,
) -> Result<Response, ApiError> {
    let label = body.validate()?;
    let status = OrderStatus::parse(label)
        .map_err(|_| ApiError::validation(format!("Invalid status: {label}")))?;
    let order = state
        .store
        .update_order_status(&id, status)
        .await
        .map_err(into_api_error)?;
    Ok(ok_data_message(
        "Sales order status updated successfully",
        order,
    ))
}

/// Deleting an order is a cancellation: stock comes back, the ledger gets
/// the reversing entries, customer aggregates roll back.
pub(crate) async fn delete_order_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    state.store.cancel_order(&id).await.map_err(into_api_error)?;
    Ok(ok_message("Sales order deleted successfully"))
}
