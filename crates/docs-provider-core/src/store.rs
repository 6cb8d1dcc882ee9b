use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StorageError;

/// Object-storage client consumed by providers.
///
/// Both operations are single-shot: listing returns one page, and fetch
/// returns the whole body buffered in memory.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Short name for logging.
    fn backend_name(&self) -> &'static str;

    /// List object keys in `bucket`, returning at most `max_keys` when given.
    async fn list_objects(
        &self,
        bucket: &str,
        max_keys: Option<i32>,
    ) -> Result<Vec<String>, StorageError>;

    /// Fetch the full body of `key` from `bucket`.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError>;
}
