// SPDX-License-Identifier: Apache-2.0

use crate::http::into_api_error;
use crate::AppState;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use gdsales_api::{ok_data, ok_message, ApiError, UpsertSettingRequest};

pub(crate) async fn list_settings_handler(
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let settings = state.store.list_settings().await.map_err(into_api_error)?;
    Ok(ok_data(settings))
}

pub(crate) async fn upsert_setting_handler(
    State(state): State<AppState>,
    Json(body): Json<UpsertSettingRequest>,
) -> Result<Response, ApiError> {
    let (key, value) = body.validate()?;
    state
        .store
        .upsert_setting(key, value)
        .await
        .map_err(into_api_error)?;
    Ok(ok_message("Setting updated successfully"))
}
