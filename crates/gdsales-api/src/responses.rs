// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

/// `200 {"success": true, "data": ...}`
pub fn ok_data<T: Serialize>(data: T) -> Response {
    Json(json!({"success": true, "data": data})).into_response()
}

/// `200 {"success": true, "message": ...}`
pub fn ok_message(message: &str) -> Response {
    Json(json!({"success": true, "message": message})).into_response()
}

/// `200 {"success": true, "message": ..., "data": ...}`
pub fn ok_data_message<T: Serialize>(message: &str, data: T) -> Response {
    Json(json!({"success": true, "message": message, "data": data})).into_response()
}

/// `201 {"success": true, "message": ..., "data": ...}`
pub fn created<T: Serialize>(message: &str, data: T) -> Response {
    (
        StatusCode::CREATED,
        Json(json!({"success": true, "message": message, "data": data})),
    )
        .into_response()
}
