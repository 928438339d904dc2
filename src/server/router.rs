use crate::core::config::AppConfig;
use crate::server::handlers::{delete_image_handler, server_status_handler, upload_image_handler};
use crate::server::types::AppState;
use crate::utils::constants::MULTIPART_OVERHEAD_BYTES;
use crate::utils::urls::to_url;
use anyhow::{Context, Error};
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, routing::get, routing::post};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// An empty allow-list opens the API to any origin, without credentials.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, Error> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if allowed_origins.is_empty() {
        return Ok(cors.allow_origin(Any));
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| {
            let url = to_url(origin.clone())
                .with_context(|| format!("invalid CORS origin {origin:?}"))?;
            HeaderValue::from_str(&url.origin().ascii_serialization())
                .with_context(|| format!("invalid CORS origin {origin:?}"))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(cors
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true))
}

pub fn build_router(state: Arc<AppState>, config: &AppConfig) -> Result<Router, Error> {
    let body_limit = config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    let router = Router::new()
        .route("/", get(server_status_handler))
        .route("/upload", post(upload_image_handler))
        .route("/delete-image", post(delete_image_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors_layer(&config.cors_allowed_origins)?)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}
