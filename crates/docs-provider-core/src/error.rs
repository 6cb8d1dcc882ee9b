/// Errors raised by an object-storage backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Client error: {0}")]
    Client(String),
}

/// Errors raised while reading or binding provider configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required properties: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    #[error("Failed to read content source {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid content source JSON: {0}")]
    Json(#[from] serde_json::Error),
}
