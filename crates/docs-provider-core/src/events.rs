//! Export event hooks.
//!
//! Observers subscribe to an [`EventChannel`] and implement any subset of the
//! [`ExportObserver`] hooks. The document and folder hooks return an
//! [`ObserverDecision`]: an observer may let the event through unchanged,
//! replace it for the observers after it, or veto it. Error and message hooks
//! are notifications only.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::document::Document;

/// A document was fully assembled and handed to export completion.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentExportedEvent {
    pub id: String,
    pub document: Document,
    pub exported_at: DateTime<Utc>,
}

impl DocumentExportedEvent {
    pub fn new(document: Document) -> Self {
        Self {
            id: document.id().to_string(),
            document,
            exported_at: Utc::now(),
        }
    }
}

/// A document was exported as part of a folder export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderDocumentExportedEvent {
    pub folder_path: String,
    pub document_id: String,
}

/// A folder export finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderExportedEvent {
    pub folder_path: String,
    pub document_count: u64,
}

/// A document failed to export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentExportErrorEvent {
    pub id: String,
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// Free-form progress message emitted during export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportMessage {
    pub level: MessageLevel,
    pub message: String,
}

impl ExportMessage {
    pub fn new(level: MessageLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExportMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.level, self.message)
    }
}

/// An observer's verdict on an event.
#[derive(Debug, Clone, PartialEq)]
pub enum ObserverDecision<E> {
    /// Pass the event on unchanged.
    Continue,
    /// Replace the event seen by later observers and by the caller.
    Modify(E),
    /// Stop dispatch; the triggering operation reports the veto.
    Veto(String),
}

/// Result of dispatching an event through every observer.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<E> {
    Proceed(E),
    Vetoed { reason: String },
}

impl<E> Outcome<E> {
    pub fn is_vetoed(&self) -> bool {
        matches!(self, Outcome::Vetoed { .. })
    }

    pub fn into_event(self) -> Option<E> {
        match self {
            Outcome::Proceed(event) => Some(event),
            Outcome::Vetoed { .. } => None,
        }
    }
}

/// Hooks fired around document and folder export. Every hook defaults to a no-op.
pub trait ExportObserver: Send + Sync {
    fn on_document_exported(
        &self,
        _event: &DocumentExportedEvent,
    ) -> ObserverDecision<DocumentExportedEvent> {
        ObserverDecision::Continue
    }

    fn on_folder_document_exported(
        &self,
        _event: &FolderDocumentExportedEvent,
    ) -> ObserverDecision<FolderDocumentExportedEvent> {
        ObserverDecision::Continue
    }

    fn on_folder_exported(
        &self,
        _event: &FolderExportedEvent,
    ) -> ObserverDecision<FolderExportedEvent> {
        ObserverDecision::Continue
    }

    fn on_document_export_error(&self, _event: DocumentExportErrorEvent) {}

    fn on_document_export_message(&self, _message: ExportMessage) {}
}

/// Synchronous, in-order dispatch to subscribed observers.
#[derive(Clone, Default)]
pub struct EventChannel {
    observers: Vec<Arc<dyn ExportObserver>>,
}

impl fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Arc<dyn ExportObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn raise_document_exported(
        &self,
        event: DocumentExportedEvent,
    ) -> Outcome<DocumentExportedEvent> {
        self.dispatch("DocumentExported", event, |o, e| o.on_document_exported(e))
    }

    pub fn raise_folder_document_exported(
        &self,
        event: FolderDocumentExportedEvent,
    ) -> Outcome<FolderDocumentExportedEvent> {
        self.dispatch("FolderDocumentExported", event, |o, e| {
            o.on_folder_document_exported(e)
        })
    }

    pub fn raise_folder_exported(&self, event: FolderExportedEvent) -> Outcome<FolderExportedEvent> {
        self.dispatch("FolderExported", event, |o, e| o.on_folder_exported(e))
    }

    pub fn raise_document_export_error(&self, event: DocumentExportErrorEvent) {
        for observer in &self.observers {
            observer.on_document_export_error(event.clone());
        }
    }

    pub fn raise_document_export_message(&self, message: ExportMessage) {
        for observer in &self.observers {
            observer.on_document_export_message(message.clone());
        }
    }

    fn dispatch<E>(
        &self,
        hook: &str,
        mut event: E,
        notify: impl Fn(&dyn ExportObserver, &E) -> ObserverDecision<E>,
    ) -> Outcome<E> {
        for observer in &self.observers {
            match notify(observer.as_ref(), &event) {
                ObserverDecision::Continue => {}
                ObserverDecision::Modify(replacement) => event = replacement,
                ObserverDecision::Veto(reason) => {
                    debug!(hook, reason = %reason, "Event vetoed by observer");
                    return Outcome::Vetoed { reason };
                }
            }
        }
        Outcome::Proceed(event)
    }
}
