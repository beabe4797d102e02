// SPDX-License-Identifier: Apache-2.0

use crate::http::into_api_error;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use gdsales_api::params::CustomerListParams;
use gdsales_api::{
    created, ok_data, ok_data_message, ok_message, ApiError, CreateCustomerRequest,
    UpdateCustomerRequest,
};
use gdsales_store::{CustomerFilter, CustomerPatch, NewCustomer};

pub(crate) async fn list_customers_handler(
    State(state): State<AppState>,
    Query(params): Query<CustomerListParams>,
) -> Result<Response, ApiError> {
    let filter = CustomerFilter {
        search: params.search,
        customer_type: params.customer_type,
        status: params.status,
    };
    let customers = state
        .store
        .list_customers(&filter)
        .await
        .map_err(into_api_error)?;
    Ok(ok_data(customers))
}

pub(crate) async fn get_customer_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let customer = state
        .store
        .get_customer(&id)
        .await
        .map_err(into_api_error)?;
    Ok(ok_data(customer))
}

pub(crate) async fn create_customer_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateCustomerRequest>,
) -> Result<Response, ApiError> {
    body.validate()?;
    let new = NewCustomer {
        name: body.name.unwrap_or_default(),
        contact: body.contact.unwrap_or_default(),
        phone: body.phone.unwrap_or_default(),
        email: body.email,
        address: body.address.unwrap_or_default(),
        tax_number: body.tax_number,
        credit_limit: body.credit_limit.unwrap_or(0.0),
        payment_terms: body.payment_terms.unwrap_or(30),
        customer_type: body.customer_type.unwrap_or_else(|| "retail".to_string()),
        status: body.status.unwrap_or_else(|| "active".to_string()),
    };
    let customer = state
        .store
        .create_customer(new)
        .await
        .map_err(into_api_error)?;
    Ok(created("Customer created successfully", customer))
}

pub(crate) async fn update_customer_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateCustomerRequest>,
) -> Result<Response, ApiError> {
    let patch = CustomerPatch {
        name: body.name,
        contact: body.contact,
        phone: body.phone,
        email: body.email,
        address: body.address,
        tax_number: body.tax_number,
        credit_limit: body.credit_limit,
        payment_terms: body.payment_terms,
        customer_type: body.customer_type,
        status: body.status,
    };
    let customer = state
        .store
        .update_customer(&id, patch)
        .await
        .map_err(into_api_error)?;
    Ok(ok_data_message("Customer updated successfully", customer))
}

pub(crate) async fn delete_customer_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    state
        .store
        .delete_customer(&id)
        .await
        .map_err(into_api_error)?;
    Ok(ok_message("Customer deleted successfully"))
}
