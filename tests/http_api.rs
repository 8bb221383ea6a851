//! Integration tests driving the public HTTP surface over real sockets.

use std::net::SocketAddr;

use starter_api::config::{AppConfig, EnvName};
use starter_api::http::HttpServer;
use tokio::net::TcpListener;
use url::Url;

fn test_config(port: u16) -> AppConfig {
    AppConfig {
        node_env: EnvName::Development,
        app_name: "starter-api".to_string(),
        port,
        web_url: Url::parse("http://localhost:3001").unwrap(),
    }
}

/// Bind an ephemeral port and serve the API on it.
async fn spawn_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(test_config(addr.port()));

    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });

    addr
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let addr = spawn_server().await;

    let body: serde_json::Value = reqwest::get(format!("http://{addr}/api/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn welcome_endpoint_greets() {
    let addr = spawn_server().await;

    let response = reqwest::get(format!("http://{addr}/api")).await.unwrap();
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Welcome to the API");
}

#[tokio::test]
async fn cross_origin_request_from_configured_origin_allowed() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{addr}/api/health"))
        .header("Origin", "http://localhost:3001")
        .send()
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:3001"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");
}

#[tokio::test]
async fn preflight_from_configured_origin_allowed() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .request(reqwest::Method::OPTIONS, format!("http://{addr}/api/health"))
        .header("Origin", "http://localhost:3001")
        .header("Access-Control-Request-Method", "GET")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:3001"
    );
    assert!(headers["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .contains("GET"));
}

#[tokio::test]
async fn cross_origin_request_from_other_origin_not_acknowledged() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{addr}/api/health"))
        .header("Origin", "http://evil.example.com")
        .send()
        .await
        .unwrap();

    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
