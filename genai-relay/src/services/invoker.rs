//! Sends a validated request to the model and shapes the outcome.

use super::metrics;
use super::providers::{GenerativeModel, GenerativePart};
use crate::models::{GenerateResponse, Operation, RelayRequest};
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct ModelInvoker {
    model: Arc<dyn GenerativeModel>,
}

impl ModelInvoker {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// Prompt first, then one inline part per attachment in upload order.
    pub fn build_parts(request: &RelayRequest) -> Vec<GenerativePart> {
        std::iter::once(GenerativePart::text(request.prompt.as_str()))
            .chain(request.attachments.iter().map(GenerativePart::from))
            .collect()
    }

    /// Call the model once. Any provider failure is logged here and replaced
    /// by the operation's fixed public message.
    pub async fn invoke(
        &self,
        operation: Operation,
        request: &RelayRequest,
    ) -> Result<GenerateResponse, AppError> {
        let parts = Self::build_parts(request);
        let model = self.model.model_name();

        let start = Instant::now();
        let result = self.model.generate_content(&parts).await;
        metrics::record_provider_latency(model, start.elapsed().as_secs_f64());

        match result {
            Ok(response) => {
                metrics::record_tokens(model, response.input_tokens, response.output_tokens);
                metrics::record_request(operation.route(), "success");

                tracing::info!(
                    route = %operation,
                    model = %model,
                    attachments = request.attachments.len(),
                    input_tokens = response.input_tokens,
                    output_tokens = response.output_tokens,
                    finish_reason = response.finish_reason.as_str(),
                    "Generation completed"
                );

                Ok(GenerateResponse {
                    output: response.text,
                })
            }
            Err(e) => {
                metrics::record_provider_error(e.error_type());
                metrics::record_request(operation.route(), "error");

                tracing::error!(
                    route = %operation,
                    model = %model,
                    error = %e,
                    "{}",
                    operation.log_label()
                );

                Err(AppError::UpstreamError(
                    operation.failure_message().to_string(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Attachment;
    use crate::services::encoder::decode_inline_data;
    use crate::services::providers::mock::MockModel;
    use axum::body::Bytes;

    fn request_with(attachments: Vec<(&str, &'static [u8])>) -> RelayRequest {
        RelayRequest {
            prompt: "Summarize".to_string(),
            attachments: attachments
                .into_iter()
                .map(|(mime, data)| Attachment {
                    field: "files".to_string(),
                    file_name: None,
                    mime_type: mime.to_string(),
                    data: Bytes::from_static(data),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn returns_model_text_as_output() {
        let model = Arc::new(MockModel::replying("exact provider text"));
        let invoker = ModelInvoker::new(model.clone());

        let response = invoker
            .invoke(Operation::Text, &request_with(vec![]))
            .await
            .unwrap();

        assert_eq!(response.output, "exact provider text");
        assert_eq!(model.calls(), vec![vec![GenerativePart::text("Summarize")]]);
    }

    #[tokio::test]
    async fn attachments_follow_the_prompt_in_order() {
        let model = Arc::new(MockModel::replying("ok"));
        let invoker = ModelInvoker::new(model.clone());

        invoker
            .invoke(
                Operation::Files,
                &request_with(vec![("text/plain", &b"one"[..]), ("application/pdf", &b"two"[..])]),
            )
            .await
            .unwrap();

        let calls = model.calls();
        let parts = &calls[0];
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], GenerativePart::text("Summarize"));

        let decoded: Vec<(String, Vec<u8>)> = parts[1..]
            .iter()
            .map(|part| match part {
                GenerativePart::InlineData(inline) => {
                    (inline.mime_type.clone(), decode_inline_data(inline).unwrap())
                }
                other => panic!("unexpected part {:?}", other),
            })
            .collect();
        assert_eq!(
            decoded,
            vec![
                ("text/plain".to_string(), b"one".to_vec()),
                ("application/pdf".to_string(), b"two".to_vec()),
            ]
        );
    }

    #[tokio::test]
    async fn provider_failure_becomes_route_message() {
        let invoker = ModelInvoker::new(Arc::new(MockModel::failing("quota exceeded")));

        let err = invoker
            .invoke(Operation::Audio, &request_with(vec![("audio/mpeg", &b"id3"[..])]))
            .await
            .unwrap_err();

        match err {
            AppError::UpstreamError(msg) => assert_eq!(msg, "Failed to generate from audio"),
            other => panic!("expected upstream error, got {:?}", other),
        }
    }
}
