use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Errors raised by an object store backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("{0}")]
    Backend(String),
}

#[derive(Debug, Clone)]
pub struct SaveOptions {
    pub content_type: String,
    pub public: bool,
}

/// Minimal blob store the gateway writes to. Keys are full object paths (`images/...`).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    fn bucket_name(&self) -> &str;

    async fn save(&self, key: &str, data: Bytes, options: SaveOptions) -> Result<(), StorageError>;

    /// Deletes `key`, failing with [`StorageError::NotFound`] when nothing is stored there.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
