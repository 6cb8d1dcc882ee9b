mod s3;

use std::sync::Arc;

use docs_provider_core::{ObjectStore, StorageError};

pub use s3::{S3Connector, S3ObjectStore, DEFAULT_OPERATION_TIMEOUT};

use crate::settings::S3Settings;

/// Builds an object-store client from bound provider settings.
pub trait StoreConnector: Send + Sync {
    fn connect(&self, settings: &S3Settings) -> Result<Arc<dyn ObjectStore>, StorageError>;
}
