//! Configuration for the DD-WRT bridge.

use ddwrt_status::RouterOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] json5::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Complete bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DdwrtBridgeConfig {
    /// Zenoh connection settings.
    #[serde(default)]
    pub zenoh: ZenohConfig,

    /// DD-WRT routers to poll.
    pub ddwrt: DdwrtConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Zenoh connection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZenohConfig {
    /// Zenoh mode: "client", "peer", or "router".
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Endpoints to connect to.
    #[serde(default)]
    pub connect: Vec<String>,

    /// Endpoints to listen on.
    #[serde(default)]
    pub listen: Vec<String>,
}

fn default_mode() -> String {
    "peer".to_string()
}

impl Default for ZenohConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            connect: Vec::new(),
            listen: Vec::new(),
        }
    }
}

/// DD-WRT specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DdwrtConfig {
    /// Key expression prefix (default: "zensight/ddwrt").
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Routers to poll.
    pub routers: Vec<RouterConfig>,
}

fn default_key_prefix() -> String {
    "zensight/ddwrt".to_string()
}

/// Configuration for a single router.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Router name (used in key expressions).
    pub name: String,

    /// Address of the web interface.
    #[serde(default = "default_address")]
    pub address: String,

    /// HTTP port (default: 80).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Web interface user (default: "admin").
    #[serde(default = "default_credential")]
    pub username: String,

    /// Web interface password (default: "admin").
    #[serde(default = "default_credential")]
    pub password: String,

    /// Poll interval in seconds (default: 120).
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Per-request timeout in milliseconds (default: 5000).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// What to publish each cycle.
    #[serde(default)]
    pub publish: PublishConfig,
}

fn default_address() -> String {
    ddwrt_status::transport::PLACEHOLDER_ADDRESS.to_string()
}

fn default_port() -> u16 {
    80
}

fn default_credential() -> String {
    "admin".to_string()
}

fn default_poll_interval() -> u64 {
    120
}

fn default_timeout_ms() -> u64 {
    5000
}

impl RouterConfig {
    /// Poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Connection options for the HTTP fetcher.
    pub fn options(&self) -> RouterOptions {
        RouterOptions::new(&self.address)
            .with_port(self.port)
            .with_credentials(&self.username, &self.password)
            .with_timeout(Duration::from_millis(self.timeout_ms))
    }
}

/// Selection of published data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Raw fields to publish (default: ["wl_quality"]).
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,

    /// Publish the connected wireless client table.
    #[serde(default)]
    pub wireless_clients: bool,

    /// Publish the ARP table.
    #[serde(default)]
    pub arp_table: bool,

    /// Publish the DHCP lease table.
    #[serde(default)]
    pub dhcp_leases: bool,

    /// Topic receiving a bare `{"quality": N}` payload (e.g. "info/wlqual").
    #[serde(default)]
    pub quality_topic: Option<String>,
}

fn default_fields() -> Vec<String> {
    vec![ddwrt_status::session::QUALITY_FIELD.to_string()]
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            fields: default_fields(),
            wireless_clients: false,
            arp_table: false,
            dhcp_leases: false,
            quality_topic: None,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DdwrtBridgeConfig {
    /// Load configuration from a JSON5 file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: DdwrtBridgeConfig = json5::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ddwrt.routers.is_empty() {
            return Err(ConfigError::Validation(
                "At least one router must be configured".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for router in &self.ddwrt.routers {
            if router.name.is_empty() {
                return Err(ConfigError::Validation(
                    "Router name cannot be empty".to_string(),
                ));
            }

            if !names.insert(router.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate router name '{}'",
                    router.name
                )));
            }

            if router.poll_interval_secs == 0 {
                return Err(ConfigError::Validation(format!(
                    "Router '{}': poll_interval_secs must be > 0",
                    router.name
                )));
            }

            if router.timeout_ms == 0 {
                return Err(ConfigError::Validation(format!(
                    "Router '{}': timeout_ms must be > 0",
                    router.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let json = r#"{
            ddwrt: {
                routers: [
                    { name: "ap1", address: "192.168.1.1" }
                ]
            }
        }"#;

        let config: DdwrtBridgeConfig = json5::from_str(json).unwrap();
        config.validate().unwrap();

        assert_eq!(config.zenoh.mode, "peer");
        assert_eq!(config.ddwrt.key_prefix, "zensight/ddwrt");

        let router = &config.ddwrt.routers[0];
        assert_eq!(router.port, 80);
        assert_eq!(router.username, "admin");
        assert_eq!(router.poll_interval(), Duration::from_secs(120));
        assert_eq!(router.publish.fields, vec!["wl_quality"]);
        assert!(!router.publish.arp_table);
        assert!(router.publish.quality_topic.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            zenoh: { mode: "client", connect: ["tcp/10.0.0.1:7447"] },
            ddwrt: {
                key_prefix: "home/ddwrt",
                routers: [
                    {
                        name: "attic",
                        address: "192.168.1.2",
                        port: 8080,
                        username: "root",
                        password: "hunter2",
                        poll_interval_secs: 30,
                        timeout_ms: 2000,
                        publish: {
                            fields: ["wl_quality", "wan_ipaddr"],
                            wireless_clients: true,
                            arp_table: true,
                            dhcp_leases: true,
                            quality_topic: "info/wlqual",
                        },
                    },
                ],
            },
            logging: { level: "debug", format: "json" },
        }"#;

        let config: DdwrtBridgeConfig = json5::from_str(json).unwrap();
        config.validate().unwrap();

        assert_eq!(config.logging.format, LogFormat::Json);
        let router = &config.ddwrt.routers[0];
        assert_eq!(router.publish.quality_topic.as_deref(), Some("info/wlqual"));

        let options = router.options();
        assert_eq!(options.base_url(), "http://192.168.1.2:8080");
        assert_eq!(options.username, "root");
        assert_eq!(options.timeout, Duration::from_millis(2000));
    }

    #[test]
    fn test_address_defaults_to_placeholder() {
        let json = r#"{ ddwrt: { routers: [ { name: "ap1" } ] } }"#;
        let config: DdwrtBridgeConfig = json5::from_str(json).unwrap();

        assert_eq!(config.ddwrt.routers[0].address, "0.0.0.0");
    }

    #[test]
    fn test_validate_empty_routers() {
        let config: DdwrtBridgeConfig = json5::from_str("{ ddwrt: { routers: [] } }").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_duplicate_names() {
        let json = r#"{
            ddwrt: { routers: [ { name: "ap1" }, { name: "ap1" } ] }
        }"#;
        let config: DdwrtBridgeConfig = json5::from_str(json).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_zero_interval() {
        let json = r#"{
            ddwrt: { routers: [ { name: "ap1", poll_interval_secs: 0 } ] }
        }"#;
        let config: DdwrtBridgeConfig = json5::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"{ ddwrt: { routers: [ { name: "ap1", address: "192.168.1.1" } ] } }"#,
        )
        .unwrap();

        let config = DdwrtBridgeConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.ddwrt.routers[0].name, "ap1");

        assert!(matches!(
            DdwrtBridgeConfig::load_from_file("/nonexistent/ddwrt.json5"),
            Err(ConfigError::Io(_))
        ));
    }
}
