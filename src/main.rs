use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::booter::Booter;
use crate::core::config::AppConfig;
use crate::core::gateway::ImageGateway;
use crate::core::s3_client::{S3ObjectStore, init_s3_client};
use crate::core::transcoder::Transcoder;
use crate::server::router::build_router;
use crate::server::types::AppState;

pub mod booter;
pub mod core;
pub mod server;
pub mod utils;

// Wire the pipeline from the startup configuration
fn init_app_state(config: &AppConfig) -> Result<AppState, anyhow::Error> {
    let client = init_s3_client(&config.storage)?;
    let store = Arc::new(S3ObjectStore::new(client, &config.storage));

    Ok(AppState {
        transcoder: Transcoder::new(config.transcode, config.transcode_concurrency),
        gateway: ImageGateway::new(store, &config.storage),
        max_upload_bytes: config.max_upload_bytes,
    })
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        bucket = %config.storage.bucket_name,
        endpoint = %config.storage.endpoint_url,
        max_upload_bytes = config.max_upload_bytes,
        max_width = config.transcode.max_width,
        quality = config.transcode.quality,
        transcode_concurrency = config.transcode_concurrency,
        "configuration loaded"
    );

    let state = Arc::new(init_app_state(&config)?);
    let router = build_router(state, &config)?;

    Booter::new(config.port).await?.start(router).await
}
