// SPDX-License-Identifier: Apache-2.0

mod support;

use serde_json::json;
use support::{admin_token, get_json, json_body, send_json, send_raw, spawn_server};

#[tokio::test]
async fn system_endpoints_are_public_and_business_routes_are_not() {
    let (addr, _store) = spawn_server().await;

    let (status, _, body) = send_raw(addr, "GET", "/healthz", &[], None).await;
    assert_eq!((status, body.as_str()), (200, "ok"));

    let (status, _, body) = send_raw(addr, "GET", "/version", &[], None).await;
    assert_eq!(status, 200);
    assert_eq!(json_body(&body)["name"], "gdsales-server");

    let (status, _, _) = send_raw(addr, "GET", "/metrics", &[], None).await;
    assert_eq!(status, 200);

    let (status, _, body) = send_raw(addr, "GET", "/products", &[], None).await;
    assert_eq!(status, 401);
    let envelope = json_body(&body);
    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["message"], "Authentication required");

    let (status, _, _) = send_raw(
        addr,
        "GET",
        "/products",
        &[("Authorization", "Bearer not-a-token")],
        None,
    )
    .await;
    assert_eq!(status, 401);
}

#[tokio::test]
async fn login_rejects_bad_credentials_with_one_message() {
    let (addr, _store) = spawn_server().await;

    let wrong_password = json!({"email": support::ADMIN_EMAIL, "password": "nope"});
    let (status, _, body) = send_raw(
        addr,
        "POST",
        "/auth/login",
        &[],
        Some(&wrong_password.to_string()),
    )
    .await;
    assert_eq!(status, 401);
    assert_eq!(json_body(&body)["message"], "Invalid email or password");

    let unknown_email = json!({"email": "ghost@gdsales.test", "password": "nope"});
    let (status, _, body) = send_raw(
        addr,
        "POST",
        "/auth/login",
        &[],
        Some(&unknown_email.to_string()),
    )
    .await;
    assert_eq!(status, 401);
    assert_eq!(json_body(&body)["message"], "Invalid email or password");

    let missing_fields = json!({"email": support::ADMIN_EMAIL});
    let (status, _, _) = send_raw(
        addr,
        "POST",
        "/auth/login",
        &[],
        Some(&missing_fields.to_string()),
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let (addr, _store) = spawn_server().await;
    let (_, head, _) = send_raw(addr, "GET", "/healthz", &[], None).await;
    assert!(head.to_lowercase().contains("x-request-id:"));

    let (_, head, _) = send_raw(addr, "GET", "/healthz", &[("x-request-id", "trace-me-7")], None).await;
    assert!(head.contains("trace-me-7"));
}

#[tokio::test]
async fn product_crud_round_trip_over_http() {
    let (addr, _store) = spawn_server().await;
    let token = admin_token(addr).await;

    let create = json!({
        "name": "Oxford Shirt", "category": "shirts", "sku": "OX-100",
        "price": 50.0, "cost": 28.0, "stock": 10, "min_stock": 2
    });
    let (status, body) = send_json(addr, "POST", "/products", &token, &create).await;
    assert_eq!(status, 201, "create failed: {body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Product created successfully");
    let id = body["data"]["id"].as_str().expect("product id").to_string();

    let (status, body) = send_json(addr, "POST", "/products", &token, &create).await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "SKU already exists");

    let incomplete = json!({"name": "No SKU"});
    let (status, body) = send_json(addr, "POST", "/products", &token, &incomplete).await;
    assert_eq!(status, 400);
    assert_eq!(
        body["message"],
        "Required fields: name, category, sku, price, cost"
    );

    let update = json!({"price": 55.0});
    let (status, body) = send_json(addr, "PUT", &format!("/products/{id}"), &token, &update).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["price"], 55.0);

    let (status, body) = get_json(addr, "/products/missing-id", &token).await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Product not found");

    let (status, body) = get_json(addr, "/products?search=Oxford", &token).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"].as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn admin_gate_blocks_non_admin_user_management() {
    let (addr, _store) = spawn_server().await;
    let token = admin_token(addr).await;

    let create = json!({
        "name": "Mina", "email": "mina@gdsales.test", "password": "mina-pass",
        "role": "sales", "department": "sales"
    });
    let (status, body) = send_json(addr, "POST", "/users", &token, &create).await;
    assert_eq!(status, 201, "create user failed: {body}");

    let login = json!({"email": "mina@gdsales.test", "password": "mina-pass"});
    let (status, _, body) =
        send_raw(addr, "POST", "/auth/login", &[], Some(&login.to_string())).await;
    assert_eq!(status, 200);
    let sales_token = json_body(&body)["data"]["token"]
        .as_str()
        .expect("token")
        .to_string();

    // Reads are open to any authenticated role; user management is not.
    let (status, _) = get_json(addr, "/products", &sales_token).await;
    assert_eq!(status, 200);
    let (status, body) = send_json(addr, "POST", "/users", &sales_token, &create).await;
    assert_eq!(status, 403);
    assert_eq!(body["message"], "Admin role required");
}

#[tokio::test]
async fn settings_round_trip() {
    let (addr, _store) = spawn_server().await;
    let token = admin_token(addr).await;

    let upsert = json!({"key": "company_name", "value": "GD Garments"});
    let (status, body) = send_json(addr, "PUT", "/settings", &token, &upsert).await;
    assert_eq!(status, 200, "upsert failed: {body}");

    let (status, body) = get_json(addr, "/settings", &token).await;
    assert_eq!(status, 200);
    let settings = body["data"].as_array().expect("array");
    assert_eq!(settings.len(), 1);
    assert_eq!(settings[0]["key"], "company_name");
    assert_eq!(settings[0]["value"], "GD Garments");
}
