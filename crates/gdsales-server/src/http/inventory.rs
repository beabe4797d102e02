// SPDX-License-Identifier: Apache-2.0

use crate::http::into_api_error;
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::Response;
use axum::Json;
use gdsales_api::params::MovementListParams;
use gdsales_api::{created, ok_data, ApiError, CreateMovementRequest};
use gdsales_model::MovementType;
use gdsales_store::{MovementFilter, NewMovement};

pub(crate) async fn list_movements_handler(
    State(state): State<AppState>,
    Query(params): Query<MovementListParams>,
) -> Result<Response, ApiError> {
    let limit = params.effective_limit();
    let filter = MovementFilter {
        product_id: params.product_id,
        movement_type: params.movement_type,
    };
    let movements = state
        .store
        .list_movements(&filter, limit)
        .await
        .map_err(into_api_error)?;
    Ok(ok_data(movements))
}

pub(crate) async fn create_movement_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateMovementRequest>,
) -> Result<Response, ApiError> {
    body.validate()?;
    let label = body.movement_type.unwrap_or_default();
    let movement_type = MovementType::parse(&label)
        .map_err(|_| ApiError::validation(format!("Invalid movement type: {label}")))?;
    let new = NewMovement {
        product_id: body.product_id.unwrap_or_default(),
        movement_type,
        quantity: body.quantity.unwrap_or(0),
        reference: body.reference,
        notes: body.notes,
    };
    let movement = state
        .store
        .post_movement(new)
        .await
        .map_err(into_api_error)?;
    Ok(created("Inventory movement created successfully", movement))
}

pub(crate) async fn overview_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let overview = state
        .store
        .inventory_overview()
        .await
        .map_err(into_api_error)?;
    Ok(ok_data(overview))
}

pub(crate) async fn low_stock_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let products = state
        .store
        .low_stock_products()
        .await
        .map_err(into_api_error)?;
    Ok(ok_data(products))
}

pub(crate) async fn by_category_handler(
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let categories = state
        .store
        .inventory_by_category()
        .await
        .map_err(into_api_error)?;
    Ok(ok_data(categories))
}
