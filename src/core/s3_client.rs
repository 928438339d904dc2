use crate::core::config::StorageConfig;
use crate::core::object_store::{ObjectStore, SaveOptions, StorageError};
use anyhow::Error;
use async_trait::async_trait;
use aws_config::Region;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::{Client, Config, config::Credentials};
use bytes::Bytes;
use std::time::Duration;

pub fn init_s3_client(config: &StorageConfig) -> Result<Client, Error> {
    let credentials = Credentials::new(
        config.access_key_id.clone(),
        config.secret_access_key.clone(),
        None, // session token
        None, // expiration
        "imgpipe",
    );

    // failed writes surface to the caller, who re-submits
    let retry_config = RetryConfig::disabled();

    let timeout_config = TimeoutConfig::builder()
        .connect_timeout(Duration::from_secs(10))
        .build();

    let s3_config = Config::builder()
        .region(Region::new(config.region.clone()))
        .endpoint_url(config.endpoint_url.clone())
        .force_path_style(true)
        .credentials_provider(credentials)
        .retry_config(retry_config)
        .timeout_config(timeout_config)
        .behavior_version_latest()
        .build();

    Ok(Client::from_conf(s3_config))
}

/// S3-compatible bucket (GCS interop, MinIO, AWS).
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: Client, config: &StorageConfig) -> Self {
        Self {
            client,
            bucket: config.bucket_name.clone(),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(service_err))
                if matches!(service_err.err(), HeadObjectError::NotFound(_)) =>
            {
                Ok(false)
            }
            Err(e) => Err(StorageError::Backend(DisplayErrorContext(&e).to_string())),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn bucket_name(&self) -> &str {
        &self.bucket
    }

    async fn save(&self, key: &str, data: Bytes, options: SaveOptions) -> Result<(), StorageError> {
        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(options.content_type)
            .body(ByteStream::from(data));

        if options.public {
            request = request.acl(ObjectCannedAcl::PublicRead);
        }

        request
            .send()
            .await
            .map_err(|e| StorageError::Backend(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        // DeleteObject succeeds on missing keys, so check first
        if !self.exists(key).await? {
            return Err(StorageError::NotFound {
                key: key.to_string(),
            });
        }

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Backend(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}
