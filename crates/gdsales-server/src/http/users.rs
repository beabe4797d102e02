// SPDX-License-Identifier: Apache-2.0

use crate::auth::{hash_password, require_admin, TokenClaims};
use crate::http::into_api_error;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::{Extension, Json};
use gdsales_api::{
    created, ok_data, ok_data_message, ok_message, ApiError, CreateUserRequest, UpdateUserRequest,
};
use gdsales_store::{NewUser, UserPatch};

pub(crate) async fn list_users_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let users = state.store.list_users().await.map_err(into_api_error)?;
    Ok(ok_data(users))
}

pub(crate) async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let user = state.store.get_user(&id).await.map_err(into_api_error)?;
    Ok(ok_data(user))
}

pub(crate) async fn create_user_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(body): Json<CreateUserRequest>,
) -> Result<Response, ApiError> {
    require_admin(&claims)?;
    body.validate()?;
    let password = body.password.unwrap_or_default();
    let new = NewUser {
        name: body.name.unwrap_or_default(),
        email: body.email.unwrap_or_default(),
        password_hash: hash_password(&state.config.auth_secret, &password),
        role: body.role.unwrap_or_default(),
        department: body.department.unwrap_or_default(),
        phone: body.phone,
        status: "active".to_string(),
        permissions: body.permissions.unwrap_or_default(),
    };
    let user = state.store.create_user(new).await.map_err(into_api_error)?;
    Ok(created("User created successfully", user))
}

pub(crate) async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Response, ApiError> {
    let patch = UserPatch {
        name: body.name,
        email: body.email,
        password_hash: None,
        role: body.role,
        department: body.department,
        phone: body.phone,
        status: body.status,
        permissions: body.permissions,
    };
    let user = state
        .store
        .update_user(&id, patch)
        .await
        .map_err(into_api_error)?;
    Ok(ok_data_message("User updated successfully", user))
}

pub(crate) async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    require_admin(&claims)?;
    state
        .store
        .delete_user(&id, &claims.sub)
        .await
        .map_err(into_api_error)?;
    Ok(ok_message("User deleted successfully"))
}
