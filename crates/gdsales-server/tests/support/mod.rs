// SPDX-License-Identifier: Apache-2.0

//! Shared harness for the HTTP contract tests: boots the real router on an
//! ephemeral port and speaks raw HTTP/1.1 over a TCP stream.

use gdsales_server::auth::hash_password;
use gdsales_server::{build_router, ApiConfig, AppState};
use gdsales_store::Store;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const TEST_SECRET: &str = "integration-test-secret-0123456789";
pub const ADMIN_EMAIL: &str = "admin@gdsales.test";
pub const ADMIN_PASSWORD: &str = "admin-pass";

pub async fn spawn_server() -> (SocketAddr, Arc<Store>) {
    let store = Arc::new(Store::open_in_memory().expect("open store"));
    store
        .ensure_admin(
            "Administrator",
            ADMIN_EMAIL,
            &hash_password(TEST_SECRET, ADMIN_PASSWORD),
        )
        .await
        .expect("seed admin");
    let config = ApiConfig {
        auth_secret: TEST_SECRET.to_string(),
        ..ApiConfig::default()
    };
    let app = build_router(AppState::new(store.clone(), config));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (addr, store)
}

pub async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&str>,
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    if let Some(payload) = body {
        req.push_str("Content-Type: application/json\r\n");
        req.push_str(&format!("Content-Length: {}\r\n", payload.len()));
    }
    for (k, v) in headers {
        req.push_str(&format!("{k}: {v}\r\n"));
    }
    req.push_str("\r\n");
    if let Some(payload) = body {
        req.push_str(payload);
    }
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, head.to_string(), body.to_string())
}

pub fn json_body(body: &str) -> serde_json::Value {
    serde_json::from_str(body).expect("json body")
}

/// Logs in as the seeded admin and returns the bearer token.
pub async fn admin_token(addr: SocketAddr) -> String {
    let payload = serde_json::json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD});
    let (status, _, body) =
        send_raw(addr, "POST", "/auth/login", &[], Some(&payload.to_string())).await;
    assert_eq!(status, 200, "login failed: {body}");
    json_body(&body)["data"]["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}

pub async fn get_json(addr: SocketAddr, path: &str, token: &str) -> (u16, serde_json::Value) {
    let auth = format!("Bearer {token}");
    let (status, _, body) = send_raw(addr, "GET", path, &[("Authorization", &auth)], None).await;
    (status, json_body(&body))
}

pub async fn send_json(
    addr: SocketAddr,
    method: &str,
    path: &str,
    token: &str,
    payload: &serde_json::Value,
) -> (u16, serde_json::Value) {
    let auth = format!("Bearer {token}");
    let (status, _, body) = send_raw(
        addr,
        method,
        path,
        &[("Authorization", &auth)],
        Some(&payload.to_string()),
    )
    .await;
    (status, json_body(&body))
}
