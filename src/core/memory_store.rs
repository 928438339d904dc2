use crate::core::object_store::{ObjectStore, SaveOptions, StorageError};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub data: Bytes,
    pub options: SaveOptions,
}

/// In-memory store that records every call, for tests.
#[derive(Default)]
pub struct MemoryObjectStore {
    bucket: String,
    objects: Mutex<HashMap<String, StoredEntry>>,
    save_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryObjectStore {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            ..Default::default()
        }
    }

    pub fn failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn get(&self, key: &str) -> Option<StoredEntry> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn bucket_name(&self) -> &str {
        &self.bucket
    }

    async fn save(&self, key: &str, data: Bytes, options: SaveOptions) -> Result<(), StorageError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend(
                "service unavailable: bucket is read-only".to_string(),
            ));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), StoredEntry { data, options });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        match self.objects.lock().unwrap().remove(key) {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound {
                key: key.to_string(),
            }),
        }
    }
}
