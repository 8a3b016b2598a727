// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

use std::{env, net::SocketAddr, path::Path};

use tracing::info;
use tracing_subscriber::EnvFilter;

use waitlist_gate::{
    api::router,
    chain::SolanaClient,
    config::{DATA_DIR_ENV, DEFAULT_DATA_DIR, DEFAULT_RPC_URL, RPC_TIMEOUT, RPC_URL_ENV},
    state::AppState,
    storage::WaitlistDb,
};

#[tokio::main]
async fn main() {
    init_tracing();

    let data_dir = env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let db_path = Path::new(&data_dir).join("waitlist.redb");
    let db = WaitlistDb::open(&db_path).expect("Failed to open registration database");

    let rpc_url: url::Url = env::var(RPC_URL_ENV)
        .unwrap_or_else(|_| DEFAULT_RPC_URL.to_string())
        .parse()
        .expect("Failed to parse Solana RPC URL");
    let chain = SolanaClient::new(rpc_url, RPC_TIMEOUT).expect("Failed to build RPC client");

    let state = AppState::new(db, chain);
    let app = router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    info!("Waitlist Gate server listening on http://{addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    if env::var("LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("shutdown signal received");
}
