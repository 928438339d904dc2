use crate::core::gateway::ImageGateway;
use crate::core::transcoder::Transcoder;
use serde::{Deserialize, Serialize};

pub struct AppState {
    pub transcoder: Transcoder,
    pub gateway: ImageGateway,
    pub max_upload_bytes: usize,
}

#[derive(Serialize, Debug, Deserialize, Clone)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Serialize, Debug, Deserialize, Clone)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct DeleteImageRequest {
    #[serde(rename = "imgName")]
    pub img_name: Option<String>,
}
