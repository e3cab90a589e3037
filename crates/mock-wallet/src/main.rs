//! Mock wallet: a local stand-in for the operator's game API.
//!
//! Serves a fixed catalog on `GET /api/games/dashboard` and answers
//! `POST /wallet/doLoginAndLaunchGame` with either a playable URL or one
//! of the wallet's failure codes, so the client can be exercised end to
//! end without the real backend.

mod config;
mod fixtures;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::MockConfig;
use crate::routes::WalletState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = MockConfig::from_env();
    let state = Arc::new(WalletState::new(&config));
    let app = routes::router(state);

    let addr = format!("0.0.0.0:{}", config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        address = %addr,
        sub_accounts = config.sub_accounts,
        "mock wallet listening"
    );
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
