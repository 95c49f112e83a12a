//! Router polling and telemetry publishing.

use std::time::Duration;

use ddwrt_status::{HttpFetcher, StatusFetcher, StatusSession};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{PublishConfig, RouterConfig};
use crate::error::Result;
use crate::publisher::{PublishStats, Publisher};
use crate::telemetry::{TelemetryPoint, TelemetryValue};

/// Polls one router and publishes its status.
pub struct RouterPoller<F = HttpFetcher> {
    name: String,
    interval: Duration,
    publish: PublishConfig,
    session: StatusSession<F>,
    publisher: Publisher,
}

impl RouterPoller<HttpFetcher> {
    /// Create a poller talking HTTP to the configured router.
    pub fn new(router: &RouterConfig, publisher: Publisher) -> Result<Self> {
        let fetcher = HttpFetcher::new(router.options())?;
        Ok(Self::with_fetcher(router, fetcher, publisher))
    }
}

impl<F: StatusFetcher> RouterPoller<F> {
    /// Create a poller around an arbitrary fetcher.
    pub fn with_fetcher(router: &RouterConfig, fetcher: F, publisher: Publisher) -> Self {
        Self {
            name: router.name.clone(),
            interval: router.poll_interval(),
            publish: router.publish.clone(),
            session: StatusSession::new(fetcher),
            publisher,
        }
    }

    /// Run the polling loop.
    ///
    /// A cycle finishes before the next one is scheduled. Failed cycles are
    /// retried after half the poll interval.
    pub async fn run(mut self) {
        info!(
            router = %self.name,
            interval_secs = self.interval.as_secs(),
            "Starting DD-WRT poller"
        );

        loop {
            let delay = match self.poll_once().await {
                Ok(stats) => {
                    debug!(
                        router = %self.name,
                        published = stats.success,
                        failed = stats.failed,
                        "Poll cycle complete"
                    );
                    self.interval
                }
                Err(e) => {
                    let retry = retry_delay(self.interval);
                    warn!(
                        router = %self.name,
                        error = %e,
                        retry_secs = retry.as_secs(),
                        "Poll cycle failed"
                    );
                    retry
                }
            };

            tokio::time::sleep(delay).await;
        }
    }

    /// Perform a single poll cycle.
    async fn poll_once(&mut self) -> Result<PublishStats> {
        self.session.init().await?;

        let points = collect_points(&self.name, &self.session, &self.publish);
        let batch: Vec<(&str, &TelemetryPoint)> = points
            .iter()
            .map(|(key, point)| (key.as_str(), point))
            .collect();
        let mut stats = self.publisher.publish_batch(batch).await;

        if let Some(topic) = &self.publish.quality_topic {
            match self.session.wireless_quality() {
                Ok(quality) => {
                    match self
                        .publisher
                        .publish_json(topic, &QualityPayload { quality })
                        .await
                    {
                        Ok(()) => stats.success += 1,
                        Err(e) => {
                            stats.failed += 1;
                            warn!(router = %self.name, error = %e, "Failed to publish quality");
                        }
                    }
                }
                Err(e) => warn!(router = %self.name, error = %e, "No wireless quality"),
            }
        }

        Ok(stats)
    }
}

/// Bare quality message for the legacy topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualityPayload {
    pub quality: u32,
}

/// Delay before retrying after a failed cycle.
pub fn retry_delay(interval: Duration) -> Duration {
    interval / 2
}

/// Build the telemetry for one cycle as `(key suffix, point)` pairs.
///
/// Missing fields and undecodable tables are logged and skipped.
pub fn collect_points<F: StatusFetcher>(
    router: &str,
    session: &StatusSession<F>,
    publish: &PublishConfig,
) -> Vec<(String, TelemetryPoint)> {
    let mut points = Vec::new();

    for name in &publish.fields {
        match session.lookup_field(name) {
            Ok(Some(raw)) => {
                let metric = format!("field/{}", name);
                let mut point =
                    TelemetryPoint::new(router, metric.clone(), TelemetryValue::from_field(raw));
                if raw.trim().ends_with('%') {
                    point = point.with_label("unit", "%");
                }
                points.push((format!("{}/{}", router, metric), point));
            }
            Ok(None) => debug!(router = %router, field = %name, "Field not reported"),
            Err(e) => warn!(router = %router, field = %name, error = %e, "Field lookup failed"),
        }
    }

    if publish.wireless_clients {
        push_table(&mut points, router, "wireless_clients", session.wireless_clients());
    }
    if publish.arp_table {
        push_table(&mut points, router, "arp_table", session.arp_table());
    }
    if publish.dhcp_leases {
        push_table(&mut points, router, "dhcp_leases", session.dhcp_leases());
    }

    points
}

fn push_table<R: Serialize>(
    points: &mut Vec<(String, TelemetryPoint)>,
    router: &str,
    metric: &str,
    rows: ddwrt_status::Result<Vec<R>>,
) {
    let rows = match rows {
        Ok(rows) => rows,
        Err(e) => {
            warn!(router = %router, table = %metric, error = %e, "Skipping table");
            return;
        }
    };

    match serde_json::to_value(&rows) {
        Ok(value) => {
            let point = TelemetryPoint::new(router, metric, TelemetryValue::Table(value))
                .with_label("rows", rows.len().to_string());
            points.push((format!("{}/{}", router, metric), point));
        }
        Err(e) => warn!(router = %router, table = %metric, error = %e, "Failed to encode table"),
    }
}
