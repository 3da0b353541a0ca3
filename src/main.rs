// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::net::SocketAddr;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use relational_file_vault::{
    api::router,
    config::{AppConfig, LogFormat, DEFAULT_LOG_FILTER, ENCRYPTION_KEY_ENV},
    crypto::{FileCipher, KeyOrigin},
    state::AppState,
    storage::{FileStorage, StoragePaths},
};

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env().expect("Invalid configuration");
    init_tracing(config.log_format);

    if config.encryption_key.origin() == KeyOrigin::Ephemeral {
        tracing::warn!(
            "{ENCRYPTION_KEY_ENV} is not set; using a random key for this process only. \
             Files encrypted now cannot be decrypted after a restart."
        );
    }

    let storage = FileStorage::new(
        StoragePaths::new(&config.storage_root),
        FileCipher::new(config.encryption_key.clone()),
    );
    storage
        .initialize()
        .expect("Failed to initialize storage directories");
    tracing::info!(root = %config.storage_root.display(), "Storage initialized");

    let app = router(AppState::new(storage));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!(%addr, "Relational Vault listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
