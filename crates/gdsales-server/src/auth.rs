// SPDX-License-Identifier: Apache-2.0

//! Bearer-token auth. Tokens are HMAC-SHA256-signed base64url JSON payloads
//! carrying `{sub, role, exp}`; password hashes use the same keyed MAC so a
//! stolen database dump alone cannot be checked offline without the server
//! secret.

use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use gdsales_api::ApiError;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub role: String,
    pub exp: u64,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn mac_for(secret: &str) -> Option<HmacSha256> {
    HmacSha256::new_from_slice(secret.as_bytes()).ok()
}

#[must_use]
pub fn hash_password(secret: &str, password: &str) -> String {
    let Some(mut mac) = mac_for(secret) else {
        return String::new();
    };
    mac.update(b"password\n");
    mac.update(password.as_bytes());
    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}

#[must_use]
pub fn verify_password(secret: &str, password: &str, stored_hash: &str) -> bool {
    let Some(mut mac) = mac_for(secret) else {
        return false;
    };
    mac.update(b"password\n");
    mac.update(password.as_bytes());
    let Ok(expected) = URL_SAFE_NO_PAD.decode(stored_hash) else {
        return false;
    };
    mac.verify_slice(&expected).is_ok()
}

#[must_use]
pub fn issue_token(secret: &str, user_id: &str, role: &str, ttl_secs: u64) -> String {
    let claims = TokenClaims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: unix_now().saturating_add(ttl_secs),
    };
    let payload = serde_json::to_vec(&claims).unwrap_or_default();
    let encoded = URL_SAFE_NO_PAD.encode(payload);
    let Some(mut mac) = mac_for(secret) else {
        return String::new();
    };
    mac.update(encoded.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
    format!("{encoded}.{signature}")
}

pub fn verify_token(secret: &str, token: &str) -> Option<TokenClaims> {
    let (encoded, signature) = token.split_once('.')?;
    let mut mac = mac_for(secret)?;
    mac.update(encoded.as_bytes());
    let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;
    mac.verify_slice(&signature).ok()?;
    let payload = URL_SAFE_NO_PAD.decode(encoded).ok()?;
    let claims: TokenClaims = serde_json::from_slice(&payload).ok()?;
    if claims.exp <= unix_now() {
        return None;
    }
    Some(claims)
}

fn bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Route-layer middleware for everything behind login. Verified claims are
/// attached as a request extension for the handlers that need the caller's
/// identity or role.
pub(crate) async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(&request) else {
        return ApiError::unauthorized("Authentication required").into_response();
    };
    let Some(claims) = verify_token(&state.config.auth_secret, token) else {
        return ApiError::unauthorized("Invalid or expired token").into_response();
    };
    request.extensions_mut().insert(claims);
    next.run(request).await
}

/// Admin gate for user management endpoints.
pub(crate) fn require_admin(claims: &TokenClaims) -> Result<(), ApiError> {
    if claims.role == gdsales_model::ADMIN_ROLE {
        Ok(())
    } else {
        Err(ApiError::forbidden("Admin role required"))
    }
}
