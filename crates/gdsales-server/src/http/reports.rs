// SPDX-License-Identifier: Apache-2.0

use crate::http::into_api_error;
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::Response;
use gdsales_api::params::{CustomerReportParams, InventoryReportParams, SalesReportParams};
use gdsales_api::{ok_data, ApiError};
use gdsales_store::{CustomerReportFilter, InventoryReportFilter, SalesReportFilter};

pub(crate) async fn dashboard_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let report = state
        .store
        .dashboard_report()
        .await
        .map_err(into_api_error)?;
    Ok(ok_data(report))
}

pub(crate) async fn sales_report_handler(
    State(state): State<AppState>,
    Query(params): Query<SalesReportParams>,
) -> Result<Response, ApiError> {
    let filter = SalesReportFilter {
        start_date: params.start_date,
        end_date: params.end_date,
        customer_id: params.customer_id,
    };
    let report = state
        .store
        .sales_report(&filter)
        .await
        .map_err(into_api_error)?;
    Ok(ok_data(report))
}

pub(crate) async fn inventory_report_handler(
    State(state): State<AppState>,
    Query(params): Query<InventoryReportParams>,
) -> Result<Response, ApiError> {
    let filter = InventoryReportFilter {
        low_stock_only: params.low_stock_only(),
        category: params.category,
    };
    let report = state
        .store
        .inventory_report(&filter)
        .await
        .map_err(into_api_error)?;
    Ok(ok_data(report))
}

pub(crate) async fn customer_report_handler(
    State(state): State<AppState>,
    Query(params): Query<CustomerReportParams>,
) -> Result<Response, ApiError> {
    let filter = CustomerReportFilter {
        customer_type: params.customer_type,
    };
    let report = state
        .store
        .customer_report(&filter)
        .await
        .map_err(into_api_error)?;
    Ok(ok_data(report))
}
