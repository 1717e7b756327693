//! Mailgate - a small HTTP relay onto the Gmail API
//!
//! Accepts JSON and multipart form submissions, builds the MIME message
//! and sends it as a delegated workspace user.

mod config;
mod error;
mod form;
mod handlers;
mod routes;
mod types;

use std::sync::Arc;

use config::ServerConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("mailgate_server=debug".parse().unwrap())
                .add_directive("mailgate_gmail=debug".parse().unwrap()),
        )
        .init();

    let config = ServerConfig::from_env();
    if config.service_account_file.is_none() {
        tracing::warn!("SERVICE_ACCOUNT_FILE is not set; sends will fail until it is");
    }
    if config.delegated_user.is_none() {
        tracing::warn!("DELEGATED_USER is not set; sends will fail until it is");
    }

    let bind_addr = config.bind_addr.clone();
    let app = routes::router(Arc::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Starting Mailgate on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
