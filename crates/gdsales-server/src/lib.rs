// SPDX-License-Identifier: Apache-2.0

//! HTTP layer for the gdsales backend: router, state, auth middleware,
//! request tracing, and plain-text metrics.

#![forbid(unsafe_code)]

pub mod auth;
pub mod config;
mod http;
mod middleware;
mod telemetry;

pub use config::{validate_startup_config, ApiConfig};

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use gdsales_store::Store;
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;
use telemetry::RequestMetrics;

pub const CRATE_NAME: &str = "gdsales-server";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: ApiConfig,
    pub ready: Arc<AtomicBool>,
    pub(crate) metrics: Arc<RequestMetrics>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<Store>, config: ApiConfig) -> Self {
        Self {
            store,
            config,
            ready: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(RequestMetrics::default()),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/healthz", get(http::system::healthz_handler))
        .route("/readyz", get(http::system::readyz_handler))
        .route("/metrics", get(http::system::metrics_handler))
        .route("/version", get(http::system::version_handler))
        .route("/auth/login", post(http::sessions::login_handler));

    let protected = Router::new()
        .route(
            "/products",
            get(http::products::list_products_handler)
                .post(http::products::create_product_handler),
        )
        .route(
            "/products/:id",
            get(http::products::get_product_handler)
                .put(http::products::update_product_handler)
                .delete(http::products::delete_product_handler),
        )
        .route(
            "/products/categories/list",
            get(http::products::list_categories_handler),
        )
        .route(
            "/customers",
            get(http::customers::list_customers_handler)
                .post(http::customers::create_customer_handler),
        )
        .route(
            "/customers/:id",
            get(http::customers::get_customer_handler)
                .put(http::customers::update_customer_handler)
                .delete(http::customers::delete_customer_handler),
        )
        .route(
            "/sales-orders",
            get(http::orders::list_orders_handler).post(http::orders::create_order_handler),
        )
        .route(
            "/sales-orders/:id",
            get(http::orders::get_order_handler).delete(http::orders::delete_order_handler),
        )
        .route(
            "/sales-orders/:id/status",
            put(http::orders::update_order_status_handler),
        )
        .route("/inventory/overview", get(http::inventory::overview_handler))
        .route(
            "/inventory/movements",
            get(http::inventory::list_movements_handler)
                .post(http::inventory::create_movement_handler),
        )
        .route("/inventory/low-stock", get(http::inventory::low_stock_handler))
        .route(
            "/inventory/by-category",
            get(http::inventory::by_category_handler),
        )
        .route(
            "/users",
            get(http::users::list_users_handler).post(http::users::create_user_handler),
        )
        .route(
            "/users/:id",
            get(http::users::get_user_handler)
                .put(http::users::update_user_handler)
                .delete(http::users::delete_user_handler),
        )
        .route("/reports/dashboard", get(http::reports::dashboard_handler))
        .route("/reports/sales", get(http::reports::sales_report_handler))
        .route(
            "/reports/inventory",
            get(http::reports::inventory_report_handler),
        )
        .route(
            "/reports/customers",
            get(http::reports::customer_report_handler),
        )
        .route(
            "/settings",
            get(http::settings::list_settings_handler)
                .put(http::settings::upsert_setting_handler),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    public
        .merge(protected)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .with_state(state)
}
