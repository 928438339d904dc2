use crate::core::transcoder::TranscodeSpec;
use crate::utils::constants::{
    DEFAULT_JPEG_QUALITY, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_MAX_WIDTH, DEFAULT_PORT,
    DEFAULT_PUBLIC_STORAGE_HOST, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_S3_ENDPOINT,
    DEFAULT_S3_REGION,
};
use crate::utils::get_env::{env_var_to_vec, get_env_var, get_env_var_or, parse_env_var_or};
use crate::utils::urls::public_object_url;
use anyhow::{Context, Error, bail};
use std::fmt;
use std::time::Duration;

/// Process-wide configuration, built once in `main` and handed to constructors.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub max_upload_bytes: usize,
    pub request_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
    pub transcode: TranscodeSpec,
    pub transcode_concurrency: usize,
    pub storage: StorageConfig,
}

#[derive(Clone)]
pub struct StorageConfig {
    pub bucket_name: String,
    pub endpoint_url: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Host used to build public URLs, e.g. `storage.googleapis.com`.
    pub public_host: String,
}

// keep credentials out of logs
impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("bucket_name", &self.bucket_name)
            .field("endpoint_url", &self.endpoint_url)
            .field("region", &self.region)
            .field("access_key_id", &"<redacted>")
            .field("secret_access_key", &"<redacted>")
            .field("public_host", &self.public_host)
            .finish()
    }
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self {
            bucket_name: get_env_var("STORAGE_BUCKET_NAME")?,
            endpoint_url: get_env_var_or("S3_ENDPOINT_URL", DEFAULT_S3_ENDPOINT),
            region: get_env_var_or("S3_REGION", DEFAULT_S3_REGION),
            access_key_id: get_env_var("S3_ACCESS_KEY_ID")?,
            secret_access_key: get_env_var("S3_SECRET_ACCESS_KEY")?,
            public_host: get_env_var_or("PUBLIC_STORAGE_HOST", DEFAULT_PUBLIC_STORAGE_HOST),
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Error> {
        let default_concurrency = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(2);

        let config = Self {
            port: parse_env_var_or("PORT", DEFAULT_PORT)?,
            max_upload_bytes: parse_env_var_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            request_timeout: Duration::from_secs(parse_env_var_or(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            cors_allowed_origins: env_var_to_vec("CORS_ALLOWED_ORIGINS"),
            transcode: TranscodeSpec {
                max_width: parse_env_var_or("TRANSCODE_MAX_WIDTH", DEFAULT_MAX_WIDTH)?,
                quality: parse_env_var_or("TRANSCODE_QUALITY", DEFAULT_JPEG_QUALITY)?,
            },
            transcode_concurrency: parse_env_var_or("TRANSCODE_CONCURRENCY", default_concurrency)?,
            storage: StorageConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.max_upload_bytes == 0 {
            bail!("MAX_UPLOAD_BYTES must be greater than zero");
        }
        if self.transcode.max_width == 0 {
            bail!("TRANSCODE_MAX_WIDTH must be greater than zero");
        }
        if !(1..=100).contains(&self.transcode.quality) {
            bail!(
                "TRANSCODE_QUALITY must be between 1 and 100, got {}",
                self.transcode.quality
            );
        }
        if self.transcode_concurrency == 0 {
            bail!("TRANSCODE_CONCURRENCY must be greater than zero");
        }
        if self.storage.bucket_name.trim().is_empty() {
            bail!("STORAGE_BUCKET_NAME must not be empty");
        }
        public_object_url(&self.storage.public_host, &self.storage.bucket_name, "key")
            .with_context(|| {
                format!("invalid PUBLIC_STORAGE_HOST {:?}", self.storage.public_host)
            })?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        port: DEFAULT_PORT,
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        cors_allowed_origins: Vec::new(),
        transcode: TranscodeSpec::default(),
        transcode_concurrency: 2,
        storage: StorageConfig {
            bucket_name: "photograma-test.appspot.com".to_string(),
            endpoint_url: DEFAULT_S3_ENDPOINT.to_string(),
            region: DEFAULT_S3_REGION.to_string(),
            access_key_id: "GOOGTESTKEY".to_string(),
            secret_access_key: "super-secret".to_string(),
            public_host: DEFAULT_PUBLIC_STORAGE_HOST.to_string(),
        },
    }
}
