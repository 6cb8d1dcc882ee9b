use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::timeout::TimeoutConfig;
use aws_sdk_s3::config::{BehaviorVersion, Credentials};
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use docs_provider_core::{ObjectStore, StorageError};
use tracing::{debug, instrument};

use super::StoreConnector;
use crate::settings::S3Settings;

/// Deadline applied to every S3 operation unless overridden.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials provider name reported to the SDK.
const CREDENTIALS_PROVIDER: &str = "docs-provider-s3";

/// Amazon S3 object store backed by `aws-sdk-s3`.
///
/// SDK retries are disabled: a failed call surfaces immediately.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: S3Client,
}

impl S3ObjectStore {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    /// Build a client from settings. A `service_url` switches to path-style
    /// addressing against that endpoint.
    pub fn from_settings(settings: &S3Settings, operation_timeout: Duration) -> Self {
        let credentials = Credentials::new(
            &settings.access_key,
            &settings.secret_key,
            None,
            None,
            CREDENTIALS_PROVIDER,
        );

        let timeouts = TimeoutConfig::builder()
            .operation_timeout(operation_timeout)
            .connect_timeout(operation_timeout)
            .build();

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new(settings.region.clone()))
            .retry_config(RetryConfig::disabled())
            .timeout_config(timeouts);

        if let Some(url) = &settings.service_url {
            builder = builder.endpoint_url(url).force_path_style(true);
        }

        Self::new(S3Client::from_conf(builder.build()))
    }

    /// HTTP status of a failed call, when the service answered.
    fn status_of<E>(err: &SdkError<E>) -> Option<u16> {
        match err {
            SdkError::ServiceError(e) => Some(e.raw().status().as_u16()),
            SdkError::ResponseError(e) => Some(e.raw().status().as_u16()),
            _ => None,
        }
    }

    /// Map an SDK failure onto the storage error taxonomy.
    fn classify<E>(err: SdkError<E>, operation: &str, target: &str) -> StorageError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let detail = format!("S3 {} {}: {}", operation, target, DisplayErrorContext(&err));
        match &err {
            SdkError::TimeoutError(_) => return StorageError::Timeout(detail),
            SdkError::DispatchFailure(e) if e.is_timeout() => {
                return StorageError::Timeout(detail)
            }
            SdkError::ConstructionFailure(_) => return StorageError::Client(detail),
            _ => {}
        }
        match Self::status_of(&err) {
            Some(404) => StorageError::NotFound(target.to_string()),
            Some(401) | Some(403) => StorageError::AccessDenied(detail),
            _ => StorageError::Io(detail),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn backend_name(&self) -> &'static str {
        "s3"
    }

    #[instrument(skip(self), level = "debug")]
    async fn list_objects(
        &self,
        bucket: &str,
        max_keys: Option<i32>,
    ) -> Result<Vec<String>, StorageError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .set_max_keys(max_keys)
            .send()
            .await
            .map_err(|e| Self::classify(e, "list_objects_v2", bucket))?;

        let keys: Vec<String> = output
            .contents()
            .iter()
            .filter_map(|object| object.key().map(str::to_string))
            .collect();

        debug!(
            bucket,
            count = keys.len(),
            truncated = output.is_truncated().unwrap_or(false),
            "Listed objects"
        );
        Ok(keys)
    }

    #[instrument(skip(self), level = "debug")]
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Self::classify(e, "get_object", key))?;

        // Draining the body releases the underlying connection.
        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Io(format!("Failed to read S3 object body {}: {}", key, e)))?
            .into_bytes();

        debug!(bucket, key, bytes = bytes.len(), "Fetched object");
        Ok(bytes)
    }
}

/// Connector producing [`S3ObjectStore`] clients.
#[derive(Debug, Clone)]
pub struct S3Connector {
    operation_timeout: Duration,
}

impl Default for S3Connector {
    fn default() -> Self {
        Self::new(DEFAULT_OPERATION_TIMEOUT)
    }
}

impl S3Connector {
    pub fn new(operation_timeout: Duration) -> Self {
        Self { operation_timeout }
    }
}

impl StoreConnector for S3Connector {
    fn connect(&self, settings: &S3Settings) -> Result<Arc<dyn ObjectStore>, StorageError> {
        debug!(
            bucket = %settings.bucket_name,
            region = %settings.region,
            endpoint = settings.service_url.as_deref().unwrap_or("default"),
            "Creating S3 client"
        );
        Ok(Arc::new(S3ObjectStore::from_settings(
            settings,
            self.operation_timeout,
        )))
    }
}
