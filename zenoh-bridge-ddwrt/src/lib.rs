//! Zenoh bridge for DD-WRT routers.
//!
//! This bridge scrapes the status pages of DD-WRT routers through their web
//! interface and publishes selected fields and tables to Zenoh as telemetry.
//!
//! # Key Expressions
//!
//! ```text
//! zensight/ddwrt/<router>/field/<name>
//! zensight/ddwrt/<router>/wireless_clients
//! zensight/ddwrt/<router>/arp_table
//! zensight/ddwrt/<router>/dhcp_leases
//! zensight/ddwrt/@/status
//! ```
//!
//! Where:
//! - `<router>` - Router name from configuration
//! - `<name>` - Firmware field name (e.g. `wl_quality`, `wan_ipaddr`)

pub mod bus;
pub mod config;
pub mod error;
pub mod poller;
pub mod publisher;
pub mod status;
pub mod telemetry;

pub use config::{DdwrtBridgeConfig, LogFormat, LoggingConfig, ZenohConfig};
pub use error::{BridgeError, Result};

/// Initialize tracing with the given configuration.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .try_init(),
    }
    .map_err(|e| BridgeError::config(format!("Failed to initialize tracing: {}", e)))
}
