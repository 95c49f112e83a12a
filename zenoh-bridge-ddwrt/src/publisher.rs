//! Telemetry publisher for Zenoh.

use std::sync::Arc;

use crate::error::{BridgeError, Result};
use crate::telemetry::TelemetryPoint;

/// Publishes JSON-encoded telemetry under a key prefix.
#[derive(Clone, Debug)]
pub struct Publisher {
    session: Arc<zenoh::Session>,
    key_prefix: String,
}

impl Publisher {
    /// Create a new publisher.
    pub fn new(session: Arc<zenoh::Session>, key_prefix: impl Into<String>) -> Self {
        Self {
            session,
            key_prefix: key_prefix.into(),
        }
    }

    /// Get the key prefix.
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Build a full key expression from a suffix.
    pub fn build_key(&self, suffix: &str) -> String {
        build_key(&self.key_prefix, suffix)
    }

    /// Publish a telemetry point under the prefix.
    pub async fn publish(&self, key_suffix: &str, point: &TelemetryPoint) -> Result<()> {
        let key = self.build_key(key_suffix);
        self.publish_json(&key, point).await
    }

    /// Publish a batch of telemetry points, logging failures.
    pub async fn publish_batch<'a, I>(&self, points: I) -> PublishStats
    where
        I: IntoIterator<Item = (&'a str, &'a TelemetryPoint)>,
    {
        let mut stats = PublishStats::default();

        for (key_suffix, point) in points {
            match self.publish(key_suffix, point).await {
                Ok(()) => stats.success += 1,
                Err(e) => {
                    stats.failed += 1;
                    tracing::warn!(error = %e, "Failed to publish telemetry");
                }
            }
        }

        stats
    }

    /// Publish any serializable value as JSON to a full key.
    pub async fn publish_json<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let payload = serde_json::to_vec(value)?;

        self.session
            .put(key, payload)
            .await
            .map_err(|e| BridgeError::Publish {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        tracing::trace!(key = %key, "Published");
        Ok(())
    }
}

/// Join a prefix and a suffix into a key expression.
pub fn build_key(prefix: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        prefix.to_string()
    } else {
        format!("{}/{}", prefix, suffix)
    }
}

/// Statistics from a batch publish operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PublishStats {
    /// Number of successfully published points.
    pub success: usize,
    /// Number of failed publishes.
    pub failed: usize,
}

impl PublishStats {
    /// Total number of attempted publishes.
    pub fn total(&self) -> usize {
        self.success + self.failed
    }
}
