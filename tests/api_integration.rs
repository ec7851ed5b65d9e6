//! API Integration Tests
//!
//! Runs the compose pipeline, then exercises the read-only configuration
//! endpoints over a real listener.

use argus_config::{
    DocumentPaths, RawParams, ValidatedParams, compose,
    server::{AppState, create_router},
};
use tokio::net::TcpListener;

// =============================================================================
// Test Helpers
// =============================================================================

/// Compose documents into a temp directory and start a server over them.
async fn start_test_server() -> (String, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let paths = DocumentPaths::new(dir.path().join("configuration"), "baseline", "namespaces");

    let raw = RawParams {
        token: "rDRJEidvpIbecUwshyCnGkuUjbymiHev".to_string(),
        region_code: String::new(),
        scrape_interval: "60".to_string(),
        dataset_label: "integration".to_string(),
        aws_region: "eu-west-1".to_string(),
        namespaces: "AWS/EC2".to_string(),
        custom_listener: None,
        custom_config_path: None,
        modules: None,
    };
    let params = ValidatedParams::from_raw(&raw).expect("params should validate");
    compose::run(&params, &paths).expect("pipeline should succeed");

    let router = create_router(AppState { paths });

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().expect("Failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    // Give server time to start
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    (format!("http://{}", addr), dir)
}

// =============================================================================
// Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_probe() {
    let (base_url, _dir) = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/healthz", base_url))
        .send()
        .await
        .expect("Failed to send healthz request");
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.expect("Failed to parse healthz response");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_index_links_both_documents() {
    let (base_url, _dir) = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(&base_url)
        .send()
        .await
        .expect("Failed to fetch index");
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("/config/collector"));
    assert!(body.contains("/config/cloudwatch"));
}

#[tokio::test]
async fn test_collector_config_served_verbatim() {
    let (base_url, dir) = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/config/collector", base_url))
        .send()
        .await
        .expect("Failed to fetch collector config");
    assert_eq!(resp.status(), 200);

    let body = resp.text().await.unwrap();
    let on_disk =
        std::fs::read_to_string(dir.path().join("configuration/collector.yml")).unwrap();
    assert_eq!(body, on_disk);
    assert!(body.contains("Bearer rDRJEidvpIbecUwshyCnGkuUjbymiHev"));
}

#[tokio::test]
async fn test_cloudwatch_config_served_verbatim() {
    let (base_url, dir) = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/config/cloudwatch", base_url))
        .send()
        .await
        .expect("Failed to fetch cloudwatch config");
    assert_eq!(resp.status(), 200);

    let body = resp.text().await.unwrap();
    let on_disk =
        std::fs::read_to_string(dir.path().join("configuration/cloudwatch.yml")).unwrap();
    assert_eq!(body, on_disk);
    assert!(body.contains("eu-west-1"));
}
