//! Inbound request shapes and the validation every route applies.

use super::operation::{Cardinality, Operation, PROMPT_REQUIRED};
use axum::body::Bytes;
use axum::extract::Multipart;
use serde::Deserialize;
use service_core::error::AppError;

/// Mime type recorded for file parts that declare none.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// JSON body of `/generate-text`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateTextRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

impl GenerateTextRequest {
    pub fn validate(self) -> Result<RelayRequest, AppError> {
        Ok(RelayRequest {
            prompt: require_prompt(self.prompt)?,
            attachments: Vec::new(),
        })
    }
}

/// An uploaded file, kept in memory for the lifetime of the request.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Multipart field the file arrived under.
    pub field: String,
    pub file_name: Option<String>,
    pub mime_type: String,
    pub data: Bytes,
}

/// Everything a multipart route received, before validation.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub prompt: Option<String>,
    pub files: Vec<Attachment>,
}

/// A validated request: a non-empty prompt plus the attachments the route accepts.
#[derive(Debug, Clone)]
pub struct RelayRequest {
    pub prompt: String,
    pub attachments: Vec<Attachment>,
}

impl UploadForm {
    /// Drain a multipart body. Parts with a filename are files, the rest are
    /// text fields of which only the first `prompt` is kept.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let mime_type = field
                        .content_type()
                        .unwrap_or(DEFAULT_MIME_TYPE)
                        .to_string();
                    let data = field.bytes().await?;

                    tracing::debug!(
                        field = %name,
                        file_name = %file_name,
                        mime_type = %mime_type,
                        size = data.len(),
                        "Received file part"
                    );

                    form.files.push(Attachment {
                        field: name,
                        file_name: Some(file_name),
                        mime_type,
                        data,
                    });
                }
                None => {
                    let value = field.text().await?;
                    if name == "prompt" && form.prompt.is_none() {
                        form.prompt = Some(value);
                    }
                }
            }
        }

        Ok(form)
    }

    /// Check the prompt, then the route's file field. Files under other
    /// field names are dropped; single-file routes keep the first file.
    pub fn validate(self, operation: Operation) -> Result<RelayRequest, AppError> {
        let prompt = require_prompt(self.prompt)?;

        let Some(rule) = operation.file_rule() else {
            return Ok(RelayRequest {
                prompt,
                attachments: Vec::new(),
            });
        };

        let mut attachments: Vec<Attachment> = self
            .files
            .into_iter()
            .filter(|file| file.field == rule.field)
            .collect();

        if attachments.is_empty() {
            return Err(AppError::BadRequest(rule.missing_message.to_string()));
        }

        if rule.cardinality == Cardinality::Single {
            attachments.truncate(1);
        }

        Ok(RelayRequest {
            prompt,
            attachments,
        })
    }
}

fn require_prompt(prompt: Option<String>) -> Result<String, AppError> {
    prompt
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest(PROMPT_REQUIRED.to_string()))
}
