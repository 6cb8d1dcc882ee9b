//! Connection lifecycle of the S3 provider.

use std::sync::Arc;

use docs_provider_core::{
    Capability, CapabilitySet, ConnectionState, ContentSource, EventChannel, ExportObserver,
    ObjectStore, ProbeResult, PropertyRegistry, ProviderSystem, RecursionLevel, StorageError,
};
use tracing::{error, info, instrument, warn};

use crate::error::{ProviderError, Result};
use crate::export::{DispatchCompletion, ExportCompletion};
use crate::settings::{provider_properties, S3Settings};
use crate::storage::{S3Connector, StoreConnector};

pub const PROVIDER_SYSTEM: ProviderSystem = ProviderSystem {
    name: "Amazon S3 Provider",
    system_type: "Amazon Web Services S3",
    company_name: "Amazon",
    product_name: "Amazon Web Services Simple Storage Service",
    product_version: "5.5",
};

/// Class tag stamped on every exported document.
pub const DOCUMENT_CLASS: &str = "S3Document";

/// Log event id for a failed login.
const LOGIN_FAILED_EVENT_ID: u32 = 200;

/// Bound settings plus the client built from them. Present only while connected.
pub(crate) struct Session {
    pub(crate) settings: S3Settings,
    pub(crate) store: Arc<dyn ObjectStore>,
}

/// Document provider for an Amazon S3 bucket.
///
/// `connect` binds the registry, builds a client and probes the bucket.
/// Export operations require [`ConnectionState::Connected`].
pub struct S3Provider {
    name: String,
    properties: PropertyRegistry,
    state: ConnectionState,
    pub(crate) session: Option<Session>,
    connector: Arc<dyn StoreConnector>,
    pub(crate) events: EventChannel,
    pub(crate) completion: Arc<dyn ExportCompletion>,
}

impl Default for S3Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl S3Provider {
    pub fn new() -> Self {
        Self::with_connector(Arc::new(S3Connector::default()))
    }

    pub fn with_connector(connector: Arc<dyn StoreConnector>) -> Self {
        Self {
            name: PROVIDER_SYSTEM.name.to_string(),
            properties: provider_properties(),
            state: ConnectionState::Disconnected,
            session: None,
            connector,
            events: EventChannel::new(),
            completion: Arc::new(DispatchCompletion),
        }
    }

    /// Replace the callback invoked once a document is fully assembled.
    pub fn with_completion(mut self, completion: Arc<dyn ExportCompletion>) -> Self {
        self.completion = completion;
        self
    }

    pub fn system(&self) -> &'static ProviderSystem {
        &PROVIDER_SYSTEM
    }

    /// Content source name when connected through one, else the system name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &PropertyRegistry {
        &self.properties
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn settings(&self) -> Option<&S3Settings> {
        self.session.as_ref().map(|s| &s.settings)
    }

    pub fn events(&self) -> &EventChannel {
        &self.events
    }

    pub fn subscribe(&mut self, observer: Arc<dyn ExportObserver>) {
        self.events.subscribe(observer);
    }

    pub fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::new().with(Capability::DocumentExport)
    }

    /// Connect to the bucket described by `source`.
    ///
    /// Configuration errors leave the provider disconnected. A failed client
    /// build or liveness probe moves it to [`ConnectionState::Unavailable`]
    /// and returns [`ProviderError::RepositoryNotAvailable`] carrying the cause.
    #[instrument(skip(self, source), fields(source = %source.name))]
    pub async fn connect(&mut self, source: &ContentSource) -> Result<()> {
        self.initialize(source);

        self.properties.bind(source);
        let settings = S3Settings::from_registry(&self.properties).inspect_err(|e| {
            error!(provider = %self.name, error = %e, "Invalid provider configuration");
        })?;

        let store = match self.connector.connect(&settings) {
            Ok(store) => store,
            Err(e) => return Err(self.login_failed(Some(e))),
        };

        let probe = probe(store.as_ref(), &settings.bucket_name).await;
        if !probe.is_available() {
            return Err(self.login_failed(probe.into_error()));
        }

        info!(
            provider = %self.name,
            bucket = %settings.bucket_name,
            backend = store.backend_name(),
            "Connected"
        );
        self.session = Some(Session { settings, store });
        self.state = ConnectionState::Connected;
        Ok(())
    }

    /// Drop the client and return to [`ConnectionState::Disconnected`].
    pub fn disconnect(&mut self) {
        if self.session.take().is_some() {
            info!(provider = %self.name, "Disconnected");
        }
        self.state = ConnectionState::Disconnected;
    }

    /// Probe the connected bucket again.
    pub async fn test_connection(&self) -> ProbeResult {
        match &self.session {
            Some(session) => probe(session.store.as_ref(), &session.settings.bucket_name).await,
            None => ProbeResult::unavailable(StorageError::Client(format!(
                "provider '{}' has no client",
                self.name
            ))),
        }
    }

    /// Keys in the bucket, from a single listing page.
    pub async fn list_object_keys(&self) -> Result<Vec<String>> {
        let session = self.session()?;
        Ok(session
            .store
            .list_objects(&session.settings.bucket_name, None)
            .await?)
    }

    pub fn search(&self, _query: &str) -> Result<Vec<String>> {
        self.unsupported(Capability::Search)
    }

    pub fn get_folder(&self, _folder_path: &str, _max_content_count: u64) -> Result<Vec<String>> {
        self.unsupported(Capability::FolderBrowsing)
    }

    pub fn folder_delimiter(&self) -> Result<char> {
        self.unsupported(Capability::FolderBrowsing)
    }

    pub fn document_count(&self, _folder_path: &str, _recursion: RecursionLevel) -> Result<u64> {
        self.unsupported(Capability::DocumentCount)
    }

    pub(crate) fn session(&self) -> Result<&Session> {
        match (&self.session, self.state) {
            (Some(session), ConnectionState::Connected) => Ok(session),
            _ => Err(ProviderError::NotConnected {
                provider: self.name.clone(),
                state: self.state,
            }),
        }
    }

    /// Reset to a fresh, disconnected provider named after `source`.
    fn initialize(&mut self, source: &ContentSource) {
        self.session = None;
        self.state = ConnectionState::Disconnected;
        self.properties = provider_properties();
        self.name = if source.name.trim().is_empty() {
            PROVIDER_SYSTEM.name.to_string()
        } else {
            source.name.trim().to_string()
        };
    }

    fn login_failed(&mut self, cause: Option<StorageError>) -> ProviderError {
        self.state = ConnectionState::Unavailable;
        error!(
            event_id = LOGIN_FAILED_EVENT_ID,
            provider = %self.name,
            cause = cause.as_ref().map(|e| e.to_string()).unwrap_or_default(),
            "Login to '{}' failed",
            self.name
        );
        ProviderError::RepositoryNotAvailable {
            provider: self.name.clone(),
            cause,
        }
    }

    fn unsupported<T>(&self, capability: Capability) -> Result<T> {
        Err(ProviderError::NotSupported {
            provider: self.name.clone(),
            capability,
        })
    }
}

/// Liveness probe: a one-key listing of `bucket`. An empty bucket counts as
/// available; any failure is logged and kept in the result.
async fn probe(store: &dyn ObjectStore, bucket: &str) -> ProbeResult {
    let result = store.list_objects(bucket, Some(1)).await.map(|_| ());
    if let Err(e) = &result {
        warn!(bucket, error = %e, "Liveness probe failed");
    }
    ProbeResult::from(result)
}
