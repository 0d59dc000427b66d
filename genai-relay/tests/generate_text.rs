//! Integration tests for `POST /generate-text`.

mod common;

use common::TestApp;
use genai_relay::config::RelayConfig;
use genai_relay::services::providers::mock::MockModel;
use genai_relay::services::providers::GenerativePart;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn returns_provider_text_verbatim() {
    let app = TestApp::spawn(MockModel::replying("Rust is a systems language.\n")).await;

    let response = app
        .post_json("/generate-text", json!({ "prompt": "What is Rust?" }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        common::json_body(response).await,
        json!({ "output": "Rust is a systems language.\n" })
    );
    assert_eq!(
        app.model.calls(),
        vec![vec![GenerativePart::text("What is Rust?")]]
    );
}

#[tokio::test]
async fn missing_prompt_is_rejected() {
    let app = TestApp::spawn(MockModel::replying("unused")).await;

    for body in [json!({}), json!({ "prompt": "" }), json!({ "prompt": null })] {
        let response = app.post_json("/generate-text", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            common::json_body(response).await,
            json!({ "code": 400, "error": "Prompt is required" })
        );
    }
    assert!(app.model.calls().is_empty());
}

#[tokio::test]
async fn body_without_json_content_type_has_no_prompt() {
    let app = TestApp::spawn(MockModel::replying("unused")).await;

    let response = app
        .client
        .post(format!("{}/generate-text", app.address))
        .body("prompt=hello")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::json_body(response).await["error"], "Prompt is required");
}

#[tokio::test]
async fn empty_json_body_has_no_prompt() {
    let app = TestApp::spawn(MockModel::replying("unused")).await;

    let response = app
        .client
        .post(format!("{}/generate-text", app.address))
        .header("content-type", "application/json")
        .body("")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        common::json_body(response).await,
        json!({ "code": 400, "error": "Prompt is required" })
    );
    assert!(app.model.calls().is_empty());
}

#[tokio::test]
async fn oversized_json_body_is_rejected() {
    let mut config = RelayConfig::with_api_key("test-api-key");
    config.uploads.max_body_bytes = 64;
    let app = TestApp::spawn_with_config(config, MockModel::replying("unused")).await;

    let response = app
        .post_json("/generate-text", json!({ "prompt": "x".repeat(256) }))
        .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(common::json_body(response).await["code"], 413);
    assert!(app.model.calls().is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let app = TestApp::spawn(MockModel::replying("unused")).await;

    let response = app
        .client
        .post(format!("{}/generate-text", app.address))
        .header("content-type", "application/json")
        .body("{\"prompt\": ")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::json_body(response).await;
    assert_eq!(body["code"], 400);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn provider_failure_returns_generic_message() {
    let app = TestApp::spawn(MockModel::failing("upstream exploded: secret detail")).await;

    let response = app
        .post_json("/generate-text", json!({ "prompt": "hi" }))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        common::json_body(response).await,
        json!({ "error": "Failed to generate text" })
    );
}
