use crate::core::error::PipelineError;
use bytes::Bytes;

pub const NO_FILE_MESSAGE: &str = "No file attached";
pub const FALLBACK_FILENAME: &str = "unknown";

/// A single uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub data: Bytes,
    pub content_type: String,
    pub filename: String,
}

impl UploadRequest {
    pub fn new(data: Bytes, content_type: Option<&str>, filename: Option<&str>) -> Self {
        Self {
            data,
            content_type: content_type
                .unwrap_or("application/octet-stream")
                .to_string(),
            filename: normalize_filename(filename),
        }
    }
}

/// Rejects declared MIME types that are not `image/*`. Runs before the body is buffered.
pub fn validate_content_type(content_type: &str) -> Result<(), PipelineError> {
    let essence = content_type.trim().to_ascii_lowercase();
    if !essence.starts_with("image/") {
        return Err(PipelineError::BadRequest(format!(
            "Uploaded file is not an image. Mimetype: {}",
            content_type
        )));
    }
    Ok(())
}

pub fn validate(request: Option<UploadRequest>) -> Result<UploadRequest, PipelineError> {
    let request = request
        .filter(|r| !r.data.is_empty())
        .ok_or_else(|| PipelineError::BadRequest(NO_FILE_MESSAGE.to_string()))?;
    validate_content_type(&request.content_type)?;
    Ok(request)
}

/// Keeps only the last path component so a client-supplied name cannot add key segments.
pub fn normalize_filename(filename: Option<&str>) -> String {
    filename
        .and_then(|name| name.rsplit(['/', '\\']).next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_FILENAME)
        .to_string()
}
