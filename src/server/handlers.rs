use crate::core::error::PipelineError;
use crate::core::validator::{self, UploadRequest, validate_content_type};
use crate::server::error::PlainTextError;
use crate::server::types::{AppState, DeleteImageRequest, UploadResponse};
use crate::utils::constants::UPLOAD_FIELD_NAME;
use axum::body::Bytes;
use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};
use serde_json::{Value, json};
use std::sync::Arc;

// server status handler
pub async fn server_status_handler() -> Json<Value> {
    Json(json!({"status": "running"}))
}

fn multipart_error(err: MultipartError, limit: usize) -> PipelineError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PipelineError::PayloadTooLarge { limit }
    } else {
        PipelineError::BadRequest(err.body_text())
    }
}

// reads the image field chunk by chunk so the size limit trips before the whole body is buffered
async fn read_image_field(mut field: Field<'_>, limit: usize) -> Result<UploadRequest, PipelineError> {
    let content_type = field.content_type().map(String::from);
    let filename = field.file_name().map(String::from);

    // MIME check happens before any bytes are buffered
    validate_content_type(content_type.as_deref().unwrap_or("application/octet-stream"))?;

    let read_start = std::time::Instant::now();
    let mut data = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if data.len() + chunk.len() > limit {
            return Err(PipelineError::PayloadTooLarge { limit });
        }
        data.extend_from_slice(&chunk);
    }

    tracing::debug!(
        size_bytes = data.len(),
        duration_ms = read_start.elapsed().as_secs_f64() * 1000.0,
        "image field read"
    );

    Ok(UploadRequest::new(
        Bytes::from(data),
        content_type.as_deref(),
        filename.as_deref(),
    ))
}

async fn read_upload(
    mut multipart: Multipart,
    limit: usize,
) -> Result<Option<UploadRequest>, PipelineError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }
        if upload.is_some() {
            return Err(PipelineError::BadRequest(
                "Only one image may be uploaded per request".to_string(),
            ));
        }
        upload = Some(read_image_field(field, limit).await?);
    }

    Ok(upload)
}

pub async fn upload_image_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, PipelineError> {
    let start_time = std::time::Instant::now();

    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "request is not multipart");
        PipelineError::BadRequest(validator::NO_FILE_MESSAGE.to_string())
    })?;

    let upload = read_upload(multipart, state.max_upload_bytes).await?;
    let UploadRequest {
        data,
        content_type,
        filename,
    } = validator::validate(upload)?;

    tracing::info!(
        filename = %filename,
        content_type = %content_type,
        size_bytes = data.len(),
        "upload received"
    );

    let image = state.transcoder.transcode(data).await?;
    let url = state.gateway.store(image, &filename).await?;

    tracing::info!(
        url = %url,
        duration_ms = start_time.elapsed().as_secs_f64() * 1000.0,
        "upload complete"
    );

    Ok(Json(UploadResponse { url }))
}

pub async fn delete_image_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, PlainTextError> {
    // an empty or malformed body is the same as a missing name
    let request: DeleteImageRequest = serde_json::from_slice(&body).unwrap_or_default();
    let image_name = request.img_name.unwrap_or_default();

    state
        .gateway
        .delete(&image_name)
        .await
        .map_err(PlainTextError)?;

    Ok((StatusCode::OK, "File successfully deleted"))
}
