// SPDX-License-Identifier: Apache-2.0

use crate::http::into_api_error;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use gdsales_api::params::ProductListParams;
use gdsales_api::{
    created, ok_data, ok_data_message, ok_message, ApiError, CreateProductRequest,
    UpdateProductRequest,
};
use gdsales_store::{NewProduct, ProductFilter, ProductPatch};

pub(crate) async fn list_products_handler(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> Result<Response, ApiError> {
    let filter = ProductFilter {
        category: params.category,
        status: params.status,
        search: params.search,
    };
    let products = state
        .store
        .list_products(&filter)
        .await
        .map_err(into_api_error)?;
    Ok(ok_data(products))
}

pub(crate) async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let product = state.store.get_product(&id).await.map_err(into_api_error)?;
    Ok(ok_data(product))
}

pub(crate) async fn create_product_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<Response, ApiError> {
    body.validate()?;
    let new = NewProduct {
        name: body.name.unwrap_or_default(),
        category: body.category.unwrap_or_default(),
        sku: body.sku.unwrap_or_default(),
        description: body.description,
        price: body.price.unwrap_or_default(),
        cost: body.cost.unwrap_or_default(),
        stock: body.stock.unwrap_or(0),
        min_stock: body.min_stock.unwrap_or(0),
        max_stock: body.max_stock.unwrap_or(0),
        unit: body.unit.unwrap_or_else(|| "piece".to_string()),
        status: body.status.unwrap_or_else(|| "active".to_string()),
        image: body.image,
    };
    let product = state
        .store
        .create_product(new)
        .await
        .map_err(into_api_error)?;
    Ok(created("Product created successfully", product))
}

pub(crate) async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Response, ApiError> {
    body.validate()?;
    let patch = ProductPatch {
        name: body.name,
        category: body.category,
        sku: body.sku,
        description: body.description,
        price: body.price,
        cost: body.cost,
        stock: body.stock,
        min_stock: body.min_stock,
        max_stock: body.max_stock,
        unit: body.unit,
        status: body.status,
        image: body.image,
    };
    let product = state
        .store
        .update_product(&id, patch)
        .await
        .map_err(into_api_error)?;
    Ok(ok_data_message("Product updated successfully", product))
}

pub(crate) async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    state
        .store
        .delete_product(&id)
        .await
        .map_err(into_api_error)?;
    Ok(ok_message("Product deleted successfully"))
}

pub(crate) async fn list_categories_handler(
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let categories = state
        .store
        .list_categories()
        .await
        .map_err(into_api_error)?;
    Ok(ok_data(categories))
}
