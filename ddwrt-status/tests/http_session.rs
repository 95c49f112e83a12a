//! Session tests against a mock DD-WRT web interface.

use std::time::Duration;

use wiremock::matchers::{basic_auth, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ddwrt_status::{Error, HttpFetcher, Page, RouterOptions, StatusFetcher, StatusSession};

const LAN: &str = "{lan_mac::00:11:22:33:44:55}\n{lan_ip::192.168.1.1}\n{arp_table::'laptop','192.168.1.10','aa:bb:cc:dd:ee:01','12'}\n";
const WIRELESS: &str = "{wl_mac::00:11:22:33:44:56}\n{wl_quality::87%}\n{active_wireless::'aa:bb:cc:dd:ee:01','ath0','1:02:03','144M','130M','11n','-52','-95','43','88'}\n";
const WAN: &str = "{wan_ipaddr::203.0.113.7}\n{wan_shortproto::dhcp}\n";
const ROUTER: &str = "{router_time::12:00:00}\n{uptime::12:00:00 up 3&nbsp;days}\n{mem_info::<b>free</b>}\n";

fn options(server: &MockServer) -> RouterOptions {
    let addr = server.address();
    RouterOptions::new(addr.ip().to_string())
        .with_port(addr.port())
        .with_credentials("root", "secret")
}

async fn mount_page(server: &MockServer, page: Page, body: &str) {
    Mock::given(method("GET"))
        .and(path(page.path()))
        .and(basic_auth("root", "secret"))
        .and(header("cache-control", "no-cache"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn router() -> MockServer {
    let server = MockServer::start().await;
    mount_page(&server, Page::Lan, LAN).await;
    mount_page(&server, Page::Wireless, WIRELESS).await;
    mount_page(&server, Page::Wan, WAN).await;
    mount_page(&server, Page::Router, ROUTER).await;
    server
}

#[tokio::test]
async fn test_init_against_router() {
    let server = router().await;
    let fetcher = HttpFetcher::new(options(&server)).unwrap();
    let mut session = StatusSession::new(fetcher);

    session.init().await.expect("init failed");

    assert!(session.is_ready());
    assert_eq!(session.lookup_field("lan_ip").unwrap(), Some("192.168.1.1"));
    assert_eq!(session.lookup_field("wan_shortproto").unwrap(), Some("dhcp"));
    assert_eq!(
        session.lookup_field("uptime").unwrap(),
        Some("12:00:00 up 3days")
    );
    // New field carrying markup never made it in.
    assert_eq!(session.lookup_field("mem_info").unwrap(), None);

    assert_eq!(session.wireless_quality().unwrap(), 87);
    assert_eq!(session.wireless_clients().unwrap()[0].snr, "43");
    assert_eq!(session.arp_table().unwrap()[0].name, "laptop");

    let names: Vec<_> = session
        .dump_fields()
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(&names[..3], &["lan_mac", "lan_ip", "arp_table"]);
}

#[tokio::test]
async fn test_empty_body_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(options(&server)).unwrap();
    assert_eq!(fetcher.fetch(Page::Lan.path()).await.unwrap(), "");

    let mut session = StatusSession::new(fetcher);
    session.init().await.unwrap();
    assert!(session.dump_fields().is_empty());
}

#[tokio::test]
async fn test_rejected_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(options(&server)).unwrap();
    let mut session = StatusSession::new(fetcher);

    match session.init().await {
        Err(Error::Transport(msg)) => assert!(msg.contains("401"), "got {msg}"),
        other => panic!("expected transport error, got {other:?}"),
    }
    assert!(!session.is_ready());
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(LAN)
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let fetcher =
        HttpFetcher::new(options(&server).with_timeout(Duration::from_millis(50))).unwrap();
    let mut session = StatusSession::new(fetcher);

    assert_eq!(
        session.init().await,
        Err(Error::Transport("timeout".to_string()))
    );
}

#[tokio::test]
async fn test_refresh_info_page() {
    let server = router().await;
    mount_page(&server, Page::Info, "{wl_quality::64%}").await;

    let mut session = StatusSession::new(HttpFetcher::new(options(&server)).unwrap());
    session.init().await.unwrap();
    session.refresh(Page::Info).await.unwrap();

    assert_eq!(session.wireless_quality().unwrap(), 64);
}
