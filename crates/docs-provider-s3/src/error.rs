use docs_provider_core::{Capability, ConfigError, ConnectionState, StorageError};

/// Errors surfaced by the S3 provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Repository '{provider}' is not available")]
    RepositoryNotAvailable {
        provider: String,
        #[source]
        cause: Option<StorageError>,
    },

    #[error("Provider '{provider}' is not connected (state: {state})")]
    NotConnected {
        provider: String,
        state: ConnectionState,
    },

    #[error("Provider '{provider}' does not support {capability}")]
    NotSupported {
        provider: String,
        capability: Capability,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
