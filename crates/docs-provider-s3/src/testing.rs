//! In-memory object store for unit tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use docs_provider_core::{ContentSource, ObjectStore, StorageError};

use crate::settings::{S3Settings, ACCESS_KEY, BUCKET_NAME, SECRET_KEY};
use crate::storage::StoreConnector;

pub const BUCKET: &str = "docs";

#[derive(Default)]
pub struct MemoryStore {
    objects: BTreeMap<String, Bytes>,
    list_error: Option<StorageError>,
    pub fetches: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, key: &str, data: &'static [u8]) -> Self {
        self.objects.insert(key.to_string(), Bytes::from_static(data));
        self
    }

    pub fn failing_list(mut self, error: StorageError) -> Self {
        self.list_error = Some(error);
        self
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list_objects(
        &self,
        bucket: &str,
        max_keys: Option<i32>,
    ) -> Result<Vec<String>, StorageError> {
        if let Some(e) = &self.list_error {
            return Err(e.clone());
        }
        if bucket != BUCKET {
            return Err(StorageError::NotFound(bucket.to_string()));
        }
        let limit = max_keys.map(|n| n as usize).unwrap_or(usize::MAX);
        Ok(self.objects.keys().take(limit).cloned().collect())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if bucket != BUCKET {
            return Err(StorageError::NotFound(bucket.to_string()));
        }
        self.objects
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }
}

/// Hands out a shared [`MemoryStore`], recording the settings it was given.
pub struct MemoryConnector {
    pub store: Arc<MemoryStore>,
    pub connect_error: Option<StorageError>,
    pub last_settings: std::sync::Mutex<Option<S3Settings>>,
}

impl MemoryConnector {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store: Arc::new(store),
            connect_error: None,
            last_settings: std::sync::Mutex::new(None),
        }
    }
}

impl StoreConnector for MemoryConnector {
    fn connect(&self, settings: &S3Settings) -> Result<Arc<dyn ObjectStore>, StorageError> {
        *self.last_settings.lock().unwrap() = Some(settings.clone());
        if let Some(e) = &self.connect_error {
            return Err(e.clone());
        }
        Ok(self.store.clone() as Arc<dyn ObjectStore>)
    }
}

pub fn source() -> ContentSource {
    ContentSource::new("Archive")
        .with(BUCKET_NAME, BUCKET)
        .with(ACCESS_KEY, "AKIDEXAMPLE")
        .with(SECRET_KEY, "secret")
}
