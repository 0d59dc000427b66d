//! Mock model for testing.

use super::{FinishReason, GenerativeModel, GenerativePart, ProviderError, ProviderResponse};
use async_trait::async_trait;
use std::sync::Mutex;

enum Script {
    Reply(String),
    Fail(String),
}

/// Scripted model: always replies with the same text or always fails, and
/// remembers the parts of every call it received.
pub struct MockModel {
    script: Script,
    calls: Mutex<Vec<Vec<GenerativePart>>>,
}

impl MockModel {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            script: Script::Reply(text.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: Script::Fail(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Parts of every call so far, oldest first.
    pub fn calls(&self) -> Vec<Vec<GenerativePart>> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    fn model_name(&self) -> &str {
        "mock"
    }

    async fn generate_content(
        &self,
        parts: &[GenerativePart],
    ) -> Result<ProviderResponse, ProviderError> {
        match self.calls.lock() {
            Ok(mut calls) => calls.push(parts.to_vec()),
            Err(poisoned) => poisoned.into_inner().push(parts.to_vec()),
        }

        match &self.script {
            Script::Reply(text) => Ok(ProviderResponse {
                text: text.clone(),
                input_tokens: parts.len() as u64,
                output_tokens: 1,
                finish_reason: FinishReason::Complete,
            }),
            Script::Fail(message) => Err(ProviderError::ApiError(message.clone())),
        }
    }
}
