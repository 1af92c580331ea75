// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP API server entry point for `canopy serve`.

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use canopy_core::application::{create_directory_client, StandardProvisioningService};
use canopy_core::domain::config::ServiceConfig;
use canopy_core::presentation::{app, AppState};

pub async fn start_server(config_path: Option<PathBuf>, port: Option<u16>) -> Result<()> {
    let mut config = ServiceConfig::load_or_default(config_path).context("Failed to load configuration")?;
    if let Some(port) = port {
        config.server.port = port;
    }

    config.validate().context("Configuration validation failed")?;

    info!(
        "Configuration loaded: backend={:?} endpoint={}",
        config.directory.backend, config.directory.endpoint
    );

    let metrics = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Prometheus recorder unavailable, /metrics disabled: {}", e);
            None
        }
    };

    let directory = create_directory_client(&config.directory).context("Failed to initialize directory client")?;
    let provisioning = Arc::new(StandardProvisioningService::new(directory, config.hierarchy.clone()));

    let router = app(AppState {
        provisioning,
        metrics,
        request_timeout: config.server.request_timeout(),
    });

    let addr = config.server.listen_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Canopy API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Canopy API shutting down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
