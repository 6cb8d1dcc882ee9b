use std::fmt;

use crate::error::StorageError;

/// Identification of a provider's target system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSystem {
    pub name: &'static str,
    pub system_type: &'static str,
    pub company_name: &'static str,
    pub product_name: &'static str,
    pub product_version: &'static str,
}

/// Connection state of a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
    Unavailable,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connected => "connected",
            ConnectionState::Unavailable => "unavailable",
        };
        f.write_str(state)
    }
}

/// How deep a folder operation descends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecursionLevel {
    #[default]
    ThisLevelOnly,
    Recursive,
}

/// Outcome of a liveness probe.
///
/// Keeps the original failure for diagnostics while callers branch on
/// [`ProbeResult::is_available`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    error: Option<StorageError>,
}

impl ProbeResult {
    pub fn available() -> Self {
        Self { error: None }
    }

    pub fn unavailable(error: StorageError) -> Self {
        Self { error: Some(error) }
    }

    pub fn is_available(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&StorageError> {
        self.error.as_ref()
    }

    pub fn into_error(self) -> Option<StorageError> {
        self.error
    }
}

impl From<Result<(), StorageError>> for ProbeResult {
    fn from(result: Result<(), StorageError>) -> Self {
        match result {
            Ok(()) => Self::available(),
            Err(e) => Self::unavailable(e),
        }
    }
}
