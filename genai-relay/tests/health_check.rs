//! Integration tests for the operational endpoints.

mod common;

use common::TestApp;
use genai_relay::services::providers::mock::MockModel;

#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::spawn(MockModel::replying("unused")).await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body = common::json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "genai-relay");
    assert_eq!(body["model"], "mock");
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = TestApp::spawn(MockModel::replying("unused")).await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .header("x-request-id", "req-42")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.headers()["x-request-id"], "req-42");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn metrics_endpoint_exposes_request_counters() {
    let app = TestApp::spawn(MockModel::replying("hello")).await;

    app.post_json("/generate-text", serde_json::json!({ "prompt": "hi" }))
        .await;

    let body = app
        .client
        .get(format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");

    assert!(body.contains("genai_requests_total"));
    assert!(body.contains("genai_provider_latency_seconds"));
}
