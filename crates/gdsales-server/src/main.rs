// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use gdsales_server::auth::hash_password;
use gdsales_server::{build_router, validate_startup_config, ApiConfig, AppState};
use gdsales_store::Store;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("GDSALES_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("GDSALES_BIND").unwrap_or_else(|_| "0.0.0.0:4000".to_string());
    let db_path = PathBuf::from(
        env::var("GDSALES_DB_PATH").unwrap_or_else(|_| "artifacts/gdsales.db".to_string()),
    );
    let config = ApiConfig {
        max_body_bytes: env_usize("GDSALES_MAX_BODY_BYTES", 256 * 1024),
        auth_secret: env::var("GDSALES_AUTH_SECRET").unwrap_or_default(),
        token_ttl_secs: env_u64("GDSALES_TOKEN_TTL_SECS", 8 * 60 * 60),
    };
    validate_startup_config(&config)?;

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("create db directory failed: {e}"))?;
    }
    let store = Arc::new(Store::open(&db_path).map_err(|e| format!("open store failed: {e}"))?);

    let admin_email =
        env::var("GDSALES_ADMIN_EMAIL").unwrap_or_else(|_| "admin@gdsales.local".to_string());
    let admin_password = env::var("GDSALES_ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string());
    store
        .ensure_admin(
            "Administrator",
            &admin_email,
            &hash_password(&config.auth_secret, &admin_password),
        )
        .await
        .map_err(|e| format!("seed admin failed: {e}"))?;

    let state = AppState::new(store, config);
    let app = build_router(state);

    let addr: std::net::SocketAddr = bind_addr
        .parse()
        .map_err(|e| format!("invalid bind addr {bind_addr}: {e}"))?;
    let socket = if addr.is_ipv4() {
        tokio::net::TcpSocket::new_v4().map_err(|e| format!("socket v4 failed: {e}"))?
    } else {
        tokio::net::TcpSocket::new_v6().map_err(|e| format!("socket v6 failed: {e}"))?
    };
    socket
        .set_reuseaddr(true)
        .map_err(|e| format!("set_reuseaddr failed: {e}"))?;
    socket
        .set_keepalive(env_bool("GDSALES_TCP_KEEPALIVE_ENABLED", true))
        .map_err(|e| format!("set_keepalive failed: {e}"))?;
    socket.bind(addr).map_err(|e| format!("bind failed: {e}"))?;
    let listener: TcpListener = socket
        .listen(1024)
        .map_err(|e| format!("listen failed: {e}"))?;
    info!("gdsales-server listening on {bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}
