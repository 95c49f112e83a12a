//! Telemetry assembly from a scraped router.

use async_trait::async_trait;
use ddwrt_status::{Error, Page, StatusFetcher, StatusSession};
use zenoh_bridge_ddwrt::config::PublishConfig;
use zenoh_bridge_ddwrt::poller::collect_points;
use zenoh_bridge_ddwrt::telemetry::TelemetryValue;

/// Serves a fixed body per status page.
struct FixedRouter;

#[async_trait]
impl StatusFetcher for FixedRouter {
    fn target(&self) -> &str {
        "192.168.1.1"
    }

    async fn fetch(&self, path: &str) -> Result<String, Error> {
        let body = if path == Page::Lan.path() {
            "{lan_ip::192.168.1.1}\n{arp_table::'laptop','192.168.1.10','aa:bb:cc:dd:ee:01','12'}\n{dhcp_leases::'laptop','192.168.1.10'}\n"
        } else if path == Page::Wireless.path() {
            "{wl_quality::87%}\n{active_wireless::'aa:bb:cc:dd:ee:01','ath0','1:02:03','144M','130M','11n','-52','-95','43','88'}\n"
        } else if path == Page::Wan.path() {
            "{wan_ipaddr::203.0.113.7}\n"
        } else {
            ""
        };
        Ok(body.to_string())
    }
}

async fn ready_session() -> StatusSession<FixedRouter> {
    let mut session = StatusSession::new(FixedRouter);
    session.init().await.expect("init failed");
    session
}

#[tokio::test]
async fn test_fields_become_points() {
    let session = ready_session().await;
    let publish = PublishConfig {
        fields: vec![
            "wl_quality".to_string(),
            "wan_ipaddr".to_string(),
            "not_reported".to_string(),
        ],
        ..Default::default()
    };

    let points = collect_points("ap1", &session, &publish);

    assert_eq!(points.len(), 2);
    let (key, quality) = &points[0];
    assert_eq!(key, "ap1/field/wl_quality");
    assert_eq!(quality.value, TelemetryValue::Gauge(87.0));
    assert_eq!(quality.labels.get("unit").map(String::as_str), Some("%"));

    let (key, wan) = &points[1];
    assert_eq!(key, "ap1/field/wan_ipaddr");
    assert_eq!(wan.source, "ap1");
    assert_eq!(wan.value, TelemetryValue::Text("203.0.113.7".to_string()));
}

#[tokio::test]
async fn test_tables_become_points() {
    let session = ready_session().await;
    let publish = PublishConfig {
        fields: Vec::new(),
        wireless_clients: true,
        arp_table: true,
        dhcp_leases: true,
        quality_topic: None,
    };

    let points = collect_points("ap1", &session, &publish);
    let keys: Vec<_> = points.iter().map(|(k, _)| k.as_str()).collect();

    // dhcp_leases is misaligned and skipped.
    assert_eq!(keys, vec!["ap1/wireless_clients", "ap1/arp_table"]);

    let TelemetryValue::Table(clients) = &points[0].1.value else {
        panic!("expected table");
    };
    assert_eq!(clients[0]["mac"], "aa:bb:cc:dd:ee:01");
    assert_eq!(clients[0]["quality"], "88");

    let TelemetryValue::Table(arp) = &points[1].1.value else {
        panic!("expected table");
    };
    assert_eq!(arp[0]["conncount"], 12);
    assert_eq!(points[1].1.labels.get("rows").map(String::as_str), Some("1"));
}

#[tokio::test]
async fn test_nothing_collected_before_ready() {
    let session = StatusSession::new(FixedRouter);
    let points = collect_points("ap1", &session, &PublishConfig::default());

    assert!(points.is_empty());
}
