//! The four generate routes.

use crate::models::{GenerateResponse, GenerateTextRequest, Operation, UploadForm};
use crate::services::metrics;
use crate::startup::AppState;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Multipart, State};
use axum::http::{header, HeaderMap};
use axum::Json;
use service_core::error::AppError;

/// `POST /generate-text` with a JSON body `{ "prompt": "..." }`.
pub async fn generate_text(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Bytes, BytesRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let operation = Operation::Text;
    let payload = payload.map_err(|e| rejected(operation, e.into()))?;

    // An empty body, or one not declared as JSON, carries no prompt.
    let body = if payload.is_empty() || !is_json_content_type(&headers) {
        GenerateTextRequest::default()
    } else {
        let Json(body) = Json::<GenerateTextRequest>::from_bytes(&payload)
            .map_err(|e| rejected(operation, e.into()))?;
        body
    };

    let request = body.validate().map_err(|e| rejected(operation, e))?;

    state.invoker.invoke(operation, &request).await.map(Json)
}

/// `POST /generate-from-image`: `prompt` field plus one `image` file.
pub async fn generate_from_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    relay_upload(state, Operation::Image, multipart).await
}

/// `POST /generate-from-files`: `prompt` field plus one or more `files`.
pub async fn generate_from_files(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    relay_upload(state, Operation::Files, multipart).await
}

/// `POST /generate-from-audio`: `prompt` field plus one `audio` file.
pub async fn generate_from_audio(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    relay_upload(state, Operation::Audio, multipart).await
}

async fn relay_upload(
    state: AppState,
    operation: Operation,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    // Without a multipart body there are no form fields to read.
    let form = match multipart {
        Ok(multipart) => UploadForm::from_multipart(multipart)
            .await
            .map_err(|e| rejected(operation, e))?,
        Err(rejection) => {
            tracing::debug!(route = %operation, reason = %rejection.body_text(), "Request is not multipart");
            UploadForm::default()
        }
    };

    let request = form.validate(operation).map_err(|e| rejected(operation, e))?;

    tracing::debug!(
        route = %operation,
        attachments = request.attachments.len(),
        "Relaying upload"
    );

    state.invoker.invoke(operation, &request).await.map(Json)
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(essence) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
    else {
        return false;
    };

    let essence = essence.trim().to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn rejected(operation: Operation, err: AppError) -> AppError {
    tracing::warn!(route = %operation, error = %err, "Rejected request");
    metrics::record_request(operation.route(), "invalid");
    err
}
