//! Generative model abstraction and implementations.
//!
//! Handlers only see the [`GenerativeModel`] trait, so the Gemini backend can
//! be swapped for the scripted mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Response contained no text candidate")]
    EmptyResponse,
}

impl ProviderError {
    /// Short label used for metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            ProviderError::ApiError(_) => "api",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::NetworkError(_) => "network",
            ProviderError::EmptyResponse => "empty_response",
        }
    }
}

/// One piece of model input: text, or bytes inlined as base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GenerativePart {
    Text(String),
    InlineData(InlineData),
}

impl GenerativePart {
    pub fn text(text: impl Into<String>) -> Self {
        GenerativePart::Text(text.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64 (standard alphabet, padded).
    pub data: String,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
    Other,
}

impl FinishReason {
    pub fn from_api(reason: Option<&str>) -> Self {
        match reason {
            None | Some("STOP") => FinishReason::Complete,
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => {
                FinishReason::ContentFilter
            }
            Some(_) => FinishReason::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FinishReason::Complete => "complete",
            FinishReason::Length => "length",
            FinishReason::ContentFilter => "content_filter",
            FinishReason::Other => "other",
        }
    }
}

/// What the relay keeps from a model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    /// Text of the first part of the first candidate.
    pub text: String,

    /// Input tokens consumed.
    pub input_tokens: u64,

    /// Output tokens generated.
    pub output_tokens: u64,

    pub finish_reason: FinishReason,
}

#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Model identifier, used for logs and metrics.
    fn model_name(&self) -> &str;

    /// Send `parts` as a single user turn and return the first candidate's text.
    async fn generate_content(
        &self,
        parts: &[GenerativePart],
    ) -> Result<ProviderResponse, ProviderError>;
}
