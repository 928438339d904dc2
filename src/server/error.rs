use crate::core::error::PipelineError;
use crate::server::types::ErrorResponse;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub const READ_IMAGE_FAILED: &str = "Failed to read image";
pub const STORE_IMAGE_FAILED: &str = "Failed to upload image to storage";
pub const UPLOAD_FAILED: &str = "Failed to upload image";
pub const DELETE_FAILED: &str = "Failed to delete the image";

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let stage = self.stage();
        let (status, error, details) = match &self {
            PipelineError::BadRequest(msg) => {
                tracing::warn!(stage, error = %msg, "upload rejected");
                (StatusCode::BAD_REQUEST, msg.clone(), None)
            }
            PipelineError::PayloadTooLarge { limit } => {
                tracing::warn!(stage, limit, "upload too large");
                (StatusCode::PAYLOAD_TOO_LARGE, self.to_string(), None)
            }
            PipelineError::ResolutionTooLarge { width, height } => {
                tracing::warn!(stage, width, height, "image resolution too large");
                (StatusCode::BAD_REQUEST, self.to_string(), None)
            }
            PipelineError::UnprocessableImage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                READ_IMAGE_FAILED.to_string(),
                Some(self.details()),
            ),
            PipelineError::StorageWrite(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                STORE_IMAGE_FAILED.to_string(),
                Some(self.details()),
            ),
            PipelineError::StorageDelete(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                DELETE_FAILED.to_string(),
                Some(self.details()),
            ),
            PipelineError::Encode(_) | PipelineError::Worker(_) | PipelineError::PublicUrl(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                UPLOAD_FAILED.to_string(),
                Some(self.details()),
            ),
        };

        if status.is_server_error() {
            tracing::error!(stage, error = %self, "upload failed");
        }

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}

/// Plain-text rendering used by `/delete-image`.
#[derive(Debug)]
pub struct PlainTextError(pub PipelineError);

impl IntoResponse for PlainTextError {
    fn into_response(self) -> Response {
        match self.0 {
            PipelineError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            err => {
                tracing::error!(stage = err.stage(), error = %err, "delete failed");
                (StatusCode::INTERNAL_SERVER_ERROR, DELETE_FAILED.to_string()).into_response()
            }
        }
    }
}
