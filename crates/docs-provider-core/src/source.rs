use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Connection-string key carrying the content source name.
const NAME_KEY: &str = "Name";
/// Connection-string key naming the provider implementation (ignored here).
const PROVIDER_KEY: &str = "Provider";

/// A named configuration source yielding string values by property name.
///
/// JSON format:
/// ```json
/// { "name": "Archive", "properties": { "BucketName": "docs", "AccessKey": "..." } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl ContentSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Parse a `Name=...;BucketName=...;AccessKey=...` connection string.
    ///
    /// Empty segments are skipped. Values may contain `=`.
    pub fn from_connection_string(connection_string: &str) -> Result<Self, ConfigError> {
        let mut source = Self::default();
        for segment in connection_string.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let (key, value) = segment.split_once('=').ok_or_else(|| {
                ConfigError::InvalidConnectionString(format!(
                    "segment '{}' is not a key=value pair",
                    segment
                ))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::InvalidConnectionString(format!(
                    "segment '{}' has an empty key",
                    segment
                )));
            }
            match key {
                NAME_KEY => source.name = value.trim().to_string(),
                PROVIDER_KEY => {}
                _ => source.set(key, value.trim()),
            }
        }
        Ok(source)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json(&json)
    }

    /// Overlay values from `other`; its non-empty name wins.
    pub fn merge(&mut self, other: ContentSource) {
        if !other.name.is_empty() {
            self.name = other.name;
        }
        self.properties.extend(other.properties);
    }
}
