//! Core traits and types for document-management storage providers.
//!
//! This crate defines the abstractions shared by provider implementations:
//! - `PropertyRegistry`: Ordered, typed configuration properties bound from a `ContentSource`
//! - `ObjectStore`: Single-page listing and object fetch against a storage backend
//! - `Document` / `Version` / `Content`: The exported document model
//! - `KeyPath`: Projection of a flat object key onto a folder hierarchy
//! - `EventChannel`: Observer hooks fired around document and folder export

mod capability;
mod document;
mod error;
mod events;
mod key_path;
mod property;
mod provider;
mod source;
mod store;

pub use capability::{Capability, CapabilitySet};
pub use document::{Content, Document, NamedStream, Version, FILE_NAME_PROPERTY};
pub use error::{ConfigError, StorageError};
pub use events::{
    DocumentExportErrorEvent, DocumentExportedEvent, EventChannel, ExportMessage, ExportObserver,
    FolderDocumentExportedEvent, FolderExportedEvent, MessageLevel, ObserverDecision, Outcome,
};
pub use key_path::{folder_path_of, KeyPath, KEY_DELIMITER};
pub use property::{PropertyRegistry, PropertyType, ProviderProperty};
pub use provider::{ConnectionState, ProbeResult, ProviderSystem, RecursionLevel};
pub use source::ContentSource;
pub use store::ObjectStore;
