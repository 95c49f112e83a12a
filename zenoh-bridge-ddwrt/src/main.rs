//! Zenoh bridge for DD-WRT routers.
//!
//! Polls router status pages and publishes them to Zenoh as telemetry.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use zenoh_bridge_ddwrt::config::DdwrtBridgeConfig;
use zenoh_bridge_ddwrt::poller::RouterPoller;
use zenoh_bridge_ddwrt::publisher::Publisher;
use zenoh_bridge_ddwrt::status::BridgeStatus;
use zenoh_bridge_ddwrt::{LoggingConfig, bus, init_tracing};

const BRIDGE_NAME: &str = "ddwrt";

/// Zenoh bridge for DD-WRT routers.
#[derive(Parser, Debug)]
#[command(name = "zenoh-bridge-ddwrt")]
#[command(about = "Polls DD-WRT status pages and publishes to Zenoh")]
#[command(version)]
struct Args {
    /// Path to configuration file (JSON5 format)
    #[arg(short, long, default_value = "ddwrt.json5")]
    config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = DdwrtBridgeConfig::load_from_file(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    let log_config = LoggingConfig {
        level: args
            .log_level
            .clone()
            .unwrap_or_else(|| config.logging.level.clone()),
        format: config.logging.format,
    };
    init_tracing(&log_config)?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting zenoh-bridge-ddwrt");
    info!("Loaded configuration from {:?}", args.config);

    let session = Arc::new(bus::connect(&config.zenoh).await?);
    let publisher = Publisher::new(session.clone(), config.ddwrt.key_prefix.clone());

    let mut tasks = Vec::new();
    for router in &config.ddwrt.routers {
        let poller = RouterPoller::new(router, publisher.clone())
            .with_context(|| format!("Failed to create poller for '{}'", router.name))?;

        info!(router = %router.name, address = %router.address, "Starting poller");

        tasks.push(tokio::spawn(poller.run()));
    }

    info!(
        "DD-WRT bridge running with {} router(s)",
        config.ddwrt.routers.len()
    );

    let status = BridgeStatus::running(BRIDGE_NAME, env!("CARGO_PKG_VERSION")).with_metadata(
        serde_json::json!({
            "routers": config.ddwrt.routers.iter().map(|r| &r.name).collect::<Vec<_>>(),
        }),
    );
    if let Err(e) = status.publish(&publisher).await {
        error!("Failed to publish bridge status: {}", e);
    }

    tokio::signal::ctrl_c().await?;
    info!("Received shutdown signal");

    for task in tasks {
        task.abort();
    }

    let _ = BridgeStatus::offline(BRIDGE_NAME, env!("CARGO_PKG_VERSION"))
        .publish(&publisher)
        .await;

    session
        .close()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to close Zenoh session: {}", e))?;
    info!("DD-WRT bridge stopped");

    Ok(())
}
