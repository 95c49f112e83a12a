//! Telemetry payloads published on the bus.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single telemetry data point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryPoint {
    /// Unix epoch milliseconds when the value was read.
    pub timestamp: i64,

    /// Router name.
    pub source: String,

    /// Metric name (e.g. "field/wl_quality", "arp_table").
    pub metric: String,

    /// The value.
    pub value: TelemetryValue,

    /// Additional context labels.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

impl TelemetryPoint {
    /// Create a new telemetry point with the current timestamp.
    pub fn new(source: impl Into<String>, metric: impl Into<String>, value: TelemetryValue) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp_millis(),
            source: source.into(),
            metric: metric.into(),
            value,
            labels: HashMap::new(),
        }
    }

    /// Add a label to this telemetry point.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }
}

/// Typed telemetry value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TelemetryValue {
    /// Numeric reading.
    Gauge(f64),

    /// Text value.
    Text(String),

    /// Decoded table rows.
    Table(serde_json::Value),
}

impl TelemetryValue {
    /// Interpret a raw field value.
    ///
    /// Numbers, including percentages like `87%`, become gauges; anything
    /// else stays text.
    pub fn from_field(raw: &str) -> Self {
        let trimmed = raw.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

        match number.parse::<f64>() {
            Ok(v) if v.is_finite() => TelemetryValue::Gauge(v),
            _ => TelemetryValue::Text(raw.to_string()),
        }
    }
}
