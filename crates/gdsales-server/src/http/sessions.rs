// SPDX-License-Identifier: Apache-2.0

use crate::auth::{issue_token, verify_password};
use crate::http::into_api_error;
use crate::AppState;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use gdsales_api::{ok_data, ApiError, LoginRequest};
use serde_json::json;

/// `POST /auth/login`. A successful login refreshes `last_login` and returns
/// the token alongside the hash-free user record. Unknown emails and wrong
/// passwords share one message so the endpoint does not leak which accounts
/// exist.
pub(crate) async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let (email, password) = body.validate()?;
    let Some(credentials) = state
        .store
        .user_credentials(email)
        .await
        .map_err(into_api_error)?
    else {
        return Err(ApiError::unauthorized("Invalid email or password"));
    };
    if !verify_password(&state.config.auth_secret, password, &credentials.password_hash) {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }
    if !credentials.active {
        return Err(ApiError::forbidden("Account is disabled"));
    }

    let user = credentials.user;
    state
        .store
        .touch_last_login(user.id.as_str())
        .await
        .map_err(into_api_error)?;
    let token = issue_token(
        &state.config.auth_secret,
        user.id.as_str(),
        &user.role,
        state.config.token_ttl_secs,
    );
    Ok(ok_data(json!({"token": token, "user": user})))
}
