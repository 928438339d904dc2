use crate::core::config::StorageConfig;
use crate::core::error::PipelineError;
use crate::core::object_store::{ObjectStore, SaveOptions};
use crate::core::transcoder::TranscodedImage;
use crate::utils::constants::IMAGES_PREFIX;
use crate::utils::urls::public_object_url;
use chrono::Utc;
use std::sync::Arc;

pub const IMAGE_NAME_REQUIRED: &str = "Image name is required";

/// Storage key for an upload: `images/<millis>-<filename>`.
///
/// Two uploads of the same filename within one millisecond map to the same key
/// and the later write replaces the earlier one.
pub fn derive_key(timestamp_millis: i64, filename: &str) -> String {
    format!("{}/{}-{}", IMAGES_PREFIX, timestamp_millis, filename)
}

/// Inverse of the public URL: the name `delete` expects for a stored object.
pub fn image_name_from_url(url: &str) -> Option<String> {
    let url = url::Url::parse(url).ok()?;
    let mut segments = url.path_segments()?.skip_while(|s| *s != IMAGES_PREFIX);
    segments.next()?;
    let name = segments.collect::<Vec<_>>().join("/");
    let name = urlencoding::decode(&name).ok()?.into_owned();
    (!name.is_empty()).then_some(name)
}

/// Writes transcoded images to the object store and hands back their public URL.
pub struct ImageGateway {
    store: Arc<dyn ObjectStore>,
    public_host: String,
}

impl ImageGateway {
    pub fn new(store: Arc<dyn ObjectStore>, config: &StorageConfig) -> Self {
        Self {
            store,
            public_host: config.public_host.clone(),
        }
    }

    /// Only fails for a host that `AppConfig::validate` would have rejected at startup.
    pub fn public_url(&self, key: &str) -> Result<String, PipelineError> {
        public_object_url(&self.public_host, self.store.bucket_name(), key)
            .map(String::from)
            .map_err(PipelineError::PublicUrl)
    }

    pub async fn store(
        &self,
        image: TranscodedImage,
        original_filename: &str,
    ) -> Result<String, PipelineError> {
        let key = derive_key(Utc::now().timestamp_millis(), original_filename);
        // URL first: a write must never succeed without a URL to return
        let url = self.public_url(&key)?;
        let size = image.bytes.len();
        let start = std::time::Instant::now();

        self.store
            .save(
                &key,
                image.bytes,
                SaveOptions {
                    content_type: image.content_type.to_string(),
                    public: true,
                },
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.store.bucket_name(),
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "image upload failed"
                );
                PipelineError::StorageWrite(e)
            })?;

        tracing::info!(
            bucket = %self.store.bucket_name(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "image uploaded"
        );

        Ok(url)
    }

    pub async fn delete(&self, image_name: &str) -> Result<(), PipelineError> {
        if image_name.trim().is_empty() {
            return Err(PipelineError::BadRequest(IMAGE_NAME_REQUIRED.to_string()));
        }

        let key = format!("{}/{}", IMAGES_PREFIX, image_name);
        self.store.delete(&key).await.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.store.bucket_name(),
                key = %key,
                "image delete failed"
            );
            PipelineError::StorageDelete(e)
        })?;

        tracing::info!(bucket = %self.store.bucket_name(), key = %key, "image deleted");
        Ok(())
    }
}
