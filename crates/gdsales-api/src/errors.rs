// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt::{Display, Formatter};

/// Failure taxonomy for the whole API surface. Every error leaves the server
/// as `{"success": false, "message": ...}` with the status below; internal
/// errors carry an opaque message and are only detailed in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Validation,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Internal,
}

impl ApiErrorKind {
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            // Business-rule violations share 400 with field validation.
            Self::Validation | Self::Conflict => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, message)
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unauthorized, message)
    }

    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Forbidden, message)
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NotFound, message)
    }

    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Conflict, message)
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::new(ApiErrorKind::Internal, "Internal server error")
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({"success": false, "message": self.message}));
        (self.kind.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_the_error_contract() {
        assert_eq!(ApiErrorKind::Validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiErrorKind::Conflict.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiErrorKind::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiErrorKind::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiErrorKind::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiErrorKind::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_stay_opaque() {
        assert_eq!(ApiError::internal().message, "Internal server error");
    }
}
