//! Amazon S3 document export provider.
//!
//! Connects to a bucket using settings bound from the provider's property
//! registry and exports stored objects as documents. Object keys double as
//! virtual folder paths: `reports/2023/summary.pdf` becomes a document in
//! folder `reports/2023`.

pub mod config;
pub mod error;
pub mod export;
pub mod output;
pub mod provider;
pub mod settings;
pub mod storage;

#[cfg(test)]
mod testing;

pub use error::{ProviderError, Result};
pub use export::{DispatchCompletion, ExportCompletion, ExportDocumentArgs};
pub use output::DirectoryCompletion;
pub use provider::{S3Provider, DOCUMENT_CLASS, PROVIDER_SYSTEM};
pub use settings::S3Settings;
pub use storage::{S3Connector, S3ObjectStore, StoreConnector};
