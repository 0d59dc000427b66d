#![allow(dead_code)]

use genai_relay::config::RelayConfig;
use genai_relay::services::providers::mock::MockModel;
use genai_relay::startup::Application;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use std::sync::Arc;
use std::time::Duration;

pub struct TestApp {
    pub address: String,
    pub model: Arc<MockModel>,
    pub client: Client,
}

impl TestApp {
    pub async fn spawn(model: MockModel) -> Self {
        Self::spawn_with_config(RelayConfig::with_api_key("test-api-key"), model).await
    }

    pub async fn spawn_with_config(mut config: RelayConfig, model: MockModel) -> Self {
        config.common.port = 0; // Random port for testing

        let model = Arc::new(model);
        let app = Application::build_with_model(config, model.clone())
            .await
            .expect("Failed to build test application");

        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            model,
            client,
        }
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_form(&self, path: &str, form: Form) -> Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn file_part(data: &[u8], file_name: &str, mime_type: &str) -> Part {
    Part::bytes(data.to_vec())
        .file_name(file_name.to_string())
        .mime_str(mime_type)
        .expect("Invalid mime type")
}

pub async fn json_body(response: Response) -> serde_json::Value {
    response.json().await.expect("Failed to parse JSON")
}
