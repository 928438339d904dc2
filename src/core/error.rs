use crate::core::object_store::StorageError;
use thiserror::Error;

/// Failure of any pipeline stage. Each variant maps to exactly one HTTP status.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Uploaded file exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    #[error("failed to decode image: {0}")]
    UnprocessableImage(#[source] image::ImageError),

    #[error("Image resolution {width}x{height} exceeds the maximum output size")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("transcode worker failed: {0}")]
    Worker(String),

    #[error("failed to build public URL: {0}")]
    PublicUrl(#[source] url::ParseError),

    #[error("storage write failed: {0}")]
    StorageWrite(#[source] StorageError),

    #[error("storage delete failed: {0}")]
    StorageDelete(#[source] StorageError),
}

impl PipelineError {
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::BadRequest(_) | PipelineError::PayloadTooLarge { .. } => "validate",
            PipelineError::UnprocessableImage(_)
            | PipelineError::ResolutionTooLarge { .. }
            | PipelineError::Encode(_)
            | PipelineError::Worker(_) => "transcode",
            PipelineError::PublicUrl(_) | PipelineError::StorageWrite(_) => "store",
            PipelineError::StorageDelete(_) => "delete",
        }
    }

    /// Underlying cause, without the variant prefix. Safe to return to callers.
    pub fn details(&self) -> String {
        match self {
            PipelineError::BadRequest(msg) => msg.clone(),
            PipelineError::PayloadTooLarge { .. } | PipelineError::ResolutionTooLarge { .. } => {
                self.to_string()
            }
            PipelineError::UnprocessableImage(e) | PipelineError::Encode(e) => e.to_string(),
            PipelineError::Worker(msg) => msg.clone(),
            PipelineError::PublicUrl(e) => e.to_string(),
            PipelineError::StorageWrite(e) | PipelineError::StorageDelete(e) => e.to_string(),
        }
    }
}
