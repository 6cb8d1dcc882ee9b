use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use docs_provider_core::{ConfigError, ContentSource};

use crate::settings::{ACCESS_KEY, BUCKET_NAME, REGION, SECRET_KEY, SERVICE_URL};

/// Configuration for the docs-provider-s3 command line.
///
/// Values are layered: JSON source file, then connection string, then
/// explicit flags (or their environment variables).
#[derive(Parser, Debug, Clone)]
#[command(name = "docs-provider-s3")]
#[command(about = "Export objects from an Amazon S3 bucket as documents")]
pub struct Config {
    /// JSON content source file ({"name": ..., "properties": {...}})
    #[arg(long, env = "DOCS_SOURCE_FILE")]
    pub source_file: Option<PathBuf>,

    /// Connection string (Name=...;BucketName=...;AccessKey=...;SecretKey=...)
    #[arg(long, env = "DOCS_CONNECTION_STRING", hide_env_values = true)]
    pub connection_string: Option<String>,

    /// Content source name used in logs and errors
    #[arg(long, env = "DOCS_SOURCE_NAME")]
    pub name: Option<String>,

    /// S3 bucket name
    #[arg(long, env = "S3_BUCKET_NAME")]
    pub bucket_name: Option<String>,

    /// S3 access key ID
    #[arg(long, env = "S3_ACCESS_KEY")]
    pub access_key: Option<String>,

    /// S3 secret access key
    #[arg(long, env = "S3_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// AWS region
    #[arg(long, env = "S3_REGION")]
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible services
    #[arg(long, env = "S3_SERVICE_URL")]
    pub service_url: Option<String>,

    /// Deadline for each S3 operation (seconds)
    #[arg(long, default_value = "30", env = "S3_TIMEOUT_SECS")]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Connect and run the liveness probe
    Probe,
    /// List object keys in the bucket (single page)
    List {
        /// Print keys as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Export objects and write their content below a directory
    Export {
        /// Object keys to export
        #[arg(required = true)]
        keys: Vec<String>,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

impl Config {
    /// Assemble the content source from every configured layer.
    pub fn content_source(&self) -> Result<ContentSource, ConfigError> {
        let mut source = match &self.source_file {
            Some(path) => ContentSource::from_json_file(path)?,
            None => ContentSource::default(),
        };

        if let Some(connection_string) = &self.connection_string {
            source.merge(ContentSource::from_connection_string(connection_string)?);
        }

        if let Some(name) = &self.name {
            source.name = name.clone();
        }

        let overrides = [
            (BUCKET_NAME, &self.bucket_name),
            (ACCESS_KEY, &self.access_key),
            (SECRET_KEY, &self.secret_key),
            (REGION, &self.region),
            (SERVICE_URL, &self.service_url),
        ];
        for (property, value) in overrides {
            if let Some(value) = value {
                source.set(property, value.clone());
            }
        }

        Ok(source)
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
