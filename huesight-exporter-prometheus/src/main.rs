//! Prometheus exporter for Hue bridges.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info, warn};

use huesight_bridge_client::{BridgeError, HttpBridgeClient};
use huesight_common::init_tracing;
use huesight_exporter_prometheus::cli::{MISSING_USERNAME, validation_hint};
use huesight_exporter_prometheus::{Args, Command, HttpServer, LightCollector};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration (file, then CLI overrides)
    let config = args.load_config()?;

    // Initialize logging
    init_tracing(&config.logging)?;

    let client = HttpBridgeClient::new(
        config.bridge.url.clone(),
        config.bridge.username.clone(),
        config.bridge.timeout(),
    )?;

    if let Some(Command::Pair { devicetype }) = &args.command {
        return pair(&client, devicetype).await;
    }

    if !config.bridge.has_username() {
        println!("{}", MISSING_USERNAME);
        return Ok(());
    }

    info!(bridge = %config.bridge.url, "Starting HueSight Prometheus Exporter");

    // Validate the bridge before serving anything
    let (collector, validation) = LightCollector::new(client).await;
    if let Err(e) = validation {
        error!(bridge = %config.bridge.url, error = %e, "Bridge validation failed");
        if let Some(hint) = validation_hint(&e) {
            warn!("{}", hint);
        }
        return Err(e.into());
    }
    let collector = Arc::new(collector);

    let listen_addr = config.prometheus.listen_addr()?;

    // Create shutdown signal
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let http_server = HttpServer::new(collector, listen_addr, config.prometheus.path.clone());
    let mut http_task = tokio::spawn(async move { http_server.run(shutdown_rx).await });

    // Wait for shutdown signal or server failure
    tokio::select! {
        result = &mut http_task => {
            return match result {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => {
                    error!("HTTP server error: {}", e);
                    Err(e)
                }
                Err(e) => Err(e.into()),
            };
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate() => {
            info!("Received SIGTERM, shutting down...");
        }
    }

    // Signal shutdown
    shutdown_tx.send(true)?;

    let _ = tokio::time::timeout(Duration::from_secs(5), http_task).await;

    info!("Exporter stopped");
    Ok(())
}

/// Send one pairing request and report the outcome.
async fn pair(client: &HttpBridgeClient, devicetype: &str) -> anyhow::Result<()> {
    match client.register(devicetype).await {
        Ok(username) => {
            println!("Paired with {}. Username: {}", client.base_url(), username);
            Ok(())
        }
        Err(BridgeError::LinkButtonNotPressed) => {
            println!("Press the link button on the bridge, then run this command again.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(unix)]
async fn terminate() {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            error!(error = %e, "Failed to install SIGTERM handler");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
