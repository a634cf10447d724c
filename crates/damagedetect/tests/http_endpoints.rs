use std::sync::Arc;

use async_trait::async_trait;
use damagedetect::config::SiteConfig;
use damagedetect::{
    build_router, AppState, DamageRecord, DirectoryFeed, DroneRecord, Error, MockFeed, Result,
    StatusFeed,
};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[derive(Debug)]
struct FailingFeed;

#[async_trait]
impl StatusFeed for FailingFeed {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn damage_statuses(&self, _refresh: bool) -> Result<Vec<DamageRecord>> {
        Err(Error::feed_unavailable("failing", "scanner offline"))
    }

    async fn drone_statuses(&self) -> Result<Vec<DroneRecord>> {
        Err(Error::feed_unavailable("failing", "fleet link down"))
    }
}

async fn spawn(feed: Arc<dyn StatusFeed>) -> std::net::SocketAddr {
    let app = build_router(AppState::new(SiteConfig::default(), feed));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

async fn send_raw(addr: std::net::SocketAddr, path: &str) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let req = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");
    (status, head.to_string(), body.to_string())
}

fn card_count(html: &str) -> usize {
    html.matches("class=\"card\"").count()
}

#[tokio::test]
async fn damage_endpoint_returns_initial_listing() {
    let addr = spawn(Arc::new(MockFeed::new())).await;
    let (status, head, body) = send_raw(addr, "/api/damage-status").await;

    assert_eq!(status, 200);
    assert!(head.to_ascii_lowercase().contains("application/json"));
    let json: Value = serde_json::from_str(&body).expect("json body");
    let items = json.as_array().expect("array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["damageType"], "Loose Engine Cowling");
    assert_eq!(items[0]["status"], "Critical");
    assert_eq!(items[0]["damageLocation"], "Left Engine 1");
    assert_eq!(items[1]["status"], "Warning");
}

#[tokio::test]
async fn damage_endpoint_refresh_adds_finding() {
    let addr = spawn(Arc::new(MockFeed::new())).await;

    let (_, _, body) = send_raw(addr, "/api/damage-status?refresh=true").await;
    let json: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(json.as_array().expect("array").len(), 3);
    assert_eq!(json[2]["damageType"], "Dented Leading Edge");
    assert_eq!(json[2]["status"], "Moderate");

    let (_, _, body) = send_raw(addr, "/api/damage-status?refresh=false").await;
    let json: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(json.as_array().expect("array").len(), 2);
}

#[tokio::test]
async fn drone_endpoint_returns_fleet() {
    let addr = spawn(Arc::new(MockFeed::new())).await;
    let (status, _, body) = send_raw(addr, "/api/drone-status").await;

    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("json body");
    let drones = json.as_array().expect("array");
    assert_eq!(drones.len(), 3);
    for drone in drones {
        let keys: Vec<_> = drone.as_object().expect("object").keys().cloned().collect();
        assert_eq!(keys.len(), 4, "unexpected fields: {keys:?}");
        assert!(drone["currentTask"].is_string());
    }
    assert_eq!(drones[1]["status"], "Charging");
}

#[tokio::test]
async fn dashboard_page_renders_one_card_per_finding() {
    let addr = spawn(Arc::new(MockFeed::new())).await;

    let (status, head, body) = send_raw(addr, "/dashboard").await;
    assert_eq!(status, 200);
    assert!(head.to_ascii_lowercase().contains("text/html"));
    assert_eq!(card_count(&body), 2);
    assert!(body.contains("href=\"/dashboard?refresh=true\""));

    let (_, _, body) = send_raw(addr, "/dashboard?refresh").await;
    assert_eq!(card_count(&body), 3);
    assert!(body.contains("Dented Leading Edge"));
}

#[tokio::test]
async fn repeated_refresh_flag_uses_first_value() {
    let addr = spawn(Arc::new(MockFeed::new())).await;

    let (status, _, body) = send_raw(addr, "/dashboard?refresh=1&refresh=0").await;
    assert_eq!(status, 200);
    assert_eq!(card_count(&body), 3);

    let (status, _, body) = send_raw(addr, "/api/damage-status?refresh=0&refresh=1").await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(json.as_array().expect("array").len(), 2);
}

#[tokio::test]
async fn drones_page_renders_fleet() {
    let addr = spawn(Arc::new(MockFeed::new())).await;
    let (status, _, body) = send_raw(addr, "/drones").await;

    assert_eq!(status, 200);
    assert_eq!(card_count(&body), 3);
    assert!(body.contains("Inspection-3"));
    assert!(body.contains("Cancel Task"));
}

#[tokio::test]
async fn home_page_and_health() {
    let addr = spawn(Arc::new(MockFeed::new())).await;

    let (status, _, body) = send_raw(addr, "/").await;
    assert_eq!(status, 200);
    assert!(body.contains("class=\"hero\""));
    assert!(body.contains("Documentation"));

    let (status, _, body) = send_raw(addr, "/healthz").await;
    assert_eq!(status, 200);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let addr = spawn(Arc::new(MockFeed::new())).await;
    let (status, _, _) = send_raw(addr, "/api/unknown").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn feed_failure_is_500_on_api() {
    let addr = spawn(Arc::new(FailingFeed)).await;

    let (status, _, body) = send_raw(addr, "/api/damage-status").await;
    assert_eq!(status, 500);
    let json: Value = serde_json::from_str(&body).expect("json body");
    assert!(json["error"]
        .as_str()
        .expect("error message")
        .contains("scanner offline"));

    let (status, _, _) = send_raw(addr, "/api/drone-status").await;
    assert_eq!(status, 500);
}

#[tokio::test]
async fn feed_failure_renders_empty_pages() {
    let addr = spawn(Arc::new(FailingFeed)).await;

    let (status, _, body) = send_raw(addr, "/dashboard").await;
    assert_eq!(status, 200);
    assert_eq!(card_count(&body), 0);
    assert!(!body.contains("scanner offline"));

    let (status, _, body) = send_raw(addr, "/drones").await;
    assert_eq!(status, 200);
    assert_eq!(card_count(&body), 0);
}

#[tokio::test]
async fn directory_feed_serves_files_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("damage-status.json"),
        r#"[{"damageType": "Cracked Fairing", "status": "Minor", "damageLocation": "Tail"}]"#,
    )
    .expect("write damage");
    std::fs::write(dir.path().join("drone-status.json"), "[]").expect("write drones");

    let addr = spawn(Arc::new(DirectoryFeed::new(dir.path()))).await;

    let (status, _, body) = send_raw(addr, "/api/damage-status").await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(json[0]["status"], "Minor");

    let (_, _, body) = send_raw(addr, "/drones").await;
    assert_eq!(card_count(&body), 0);

    // No refresh payload on disk.
    let (status, _, _) = send_raw(addr, "/api/damage-status?refresh=1").await;
    assert_eq!(status, 500);
}
