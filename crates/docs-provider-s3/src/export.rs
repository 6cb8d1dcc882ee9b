//! Export pipeline: object key in, populated document out.

use async_trait::async_trait;
use docs_provider_core::{
    Content, Document, DocumentExportErrorEvent, DocumentExportedEvent, EventChannel,
    ExportMessage, KeyPath, MessageLevel, NamedStream, FILE_NAME_PROPERTY,
};
use tracing::{debug, error, instrument, warn};

use crate::error::Result;
use crate::provider::{S3Provider, DOCUMENT_CLASS};

/// Arguments of one export request; `document` is filled in by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocumentArgs {
    pub id: String,
    pub document: Option<Document>,
}

impl ExportDocumentArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            document: None,
        }
    }
}

/// Host callback run once a document is fully populated.
///
/// Its return value becomes the result of the export.
#[async_trait]
pub trait ExportCompletion: Send + Sync {
    async fn export_complete(&self, events: &EventChannel, args: ExportDocumentArgs) -> bool;
}

/// Default completion: raise `DocumentExported` and report whether any
/// observer vetoed it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchCompletion;

#[async_trait]
impl ExportCompletion for DispatchCompletion {
    async fn export_complete(&self, events: &EventChannel, args: ExportDocumentArgs) -> bool {
        let Some(document) = args.document else {
            warn!(id = %args.id, "Export completed without a document");
            return false;
        };
        !events
            .raise_document_exported(DocumentExportedEvent::new(document))
            .is_vetoed()
    }
}

impl S3Provider {
    /// Export the object stored under `id`.
    pub async fn export_document(&self, id: &str) -> Result<bool> {
        self.export_document_args(ExportDocumentArgs::new(id)).await
    }

    /// Build the document for `args.id`, attach it to `args` and hand both
    /// to the export completion.
    ///
    /// Failures are logged, raised as `DocumentExportError` and returned
    /// unchanged; the completion is not invoked.
    pub async fn export_document_args(&self, mut args: ExportDocumentArgs) -> Result<bool> {
        let document = match self.build_document(&args.id).await {
            Ok(document) => document,
            Err(e) => {
                error!(key = %args.id, error = %e, "Document export failed");
                self.events.raise_document_export_error(DocumentExportErrorEvent {
                    id: args.id.clone(),
                    error: e.to_string(),
                });
                return Err(e);
            }
        };

        args.document = Some(document);
        Ok(self.completion.export_complete(&self.events, args).await)
    }

    /// Assemble the document for `key` without running the completion.
    ///
    /// The folder path comes from the key prefix. The primary version's
    /// `FileName` is the extension-stripped name, while the content keeps the
    /// full file name.
    #[instrument(skip(self), level = "debug")]
    pub async fn build_document(&self, key: &str) -> Result<Document> {
        let session = self.session()?;
        let path = KeyPath::parse(key);

        let mut document = Document::new(key, DOCUMENT_CLASS);
        document
            .ensure_primary_version()
            .set_property(FILE_NAME_PROPERTY, path.display_base_name());

        if !path.is_root() {
            document.add_folder_path(path.folder_path());
        }

        let data = session
            .store
            .get_object(&session.settings.bucket_name, key)
            .await?;
        let size = data.len();

        document
            .ensure_primary_version()
            .add_content(Content::new(NamedStream::new(data, path.file_name())));

        debug!(key, bytes = size, folder = path.folder_path(), "Built document");
        self.events.raise_document_export_message(ExportMessage::new(
            MessageLevel::Debug,
            format!("Fetched {} bytes for '{}'", size, key),
        ));
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::{Arc, Mutex};

    use docs_provider_core::{
        ConnectionState, ExportObserver, ObserverDecision, StorageError,
    };

    use super::*;
    use crate::error::ProviderError;
    use crate::testing::{source, MemoryConnector, MemoryStore};

    #[derive(Default)]
    struct Collector {
        exported: Mutex<Vec<Document>>,
        errors: Mutex<Vec<DocumentExportErrorEvent>>,
        messages: Mutex<Vec<ExportMessage>>,
    }

    impl ExportObserver for Collector {
        fn on_document_exported(
            &self,
            event: &DocumentExportedEvent,
        ) -> ObserverDecision<DocumentExportedEvent> {
            self.exported.lock().unwrap().push(event.document.clone());
            ObserverDecision::Continue
        }

        fn on_document_export_error(&self, event: DocumentExportErrorEvent) {
            self.errors.lock().unwrap().push(event);
        }

        fn on_document_export_message(&self, message: ExportMessage) {
            self.messages.lock().unwrap().push(message);
        }
    }

    struct VetoAll;

    impl ExportObserver for VetoAll {
        fn on_document_exported(
            &self,
            _event: &DocumentExportedEvent,
        ) -> ObserverDecision<DocumentExportedEvent> {
            ObserverDecision::Veto("read-only archive".to_string())
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_object("reports/2023/summary.pdf", b"%PDF-1.7")
            .with_object("root.txt", b"hello")
            .with_object("notes/README", b"readme")
    }

    async fn connected(store: MemoryStore) -> (S3Provider, Arc<MemoryConnector>, Arc<Collector>) {
        let connector = Arc::new(MemoryConnector::new(store));
        let collector = Arc::new(Collector::default());
        let mut provider = S3Provider::with_connector(connector.clone());
        provider.subscribe(collector.clone());
        provider.connect(&source()).await.unwrap();
        (provider, connector, collector)
    }

    #[tokio::test]
    async fn test_export_nested_key() {
        let (provider, _, collector) = connected(store()).await;

        assert!(provider.export_document("reports/2023/summary.pdf").await.unwrap());

        let exported = collector.exported.lock().unwrap();
        assert_eq!(exported.len(), 1);
        let document = &exported[0];
        assert_eq!(document.id(), "reports/2023/summary.pdf");
        assert_eq!(document.document_class(), DOCUMENT_CLASS);
        assert_eq!(
            document.folder_paths().iter().collect::<Vec<_>>(),
            vec!["reports/2023"]
        );
        assert_eq!(document.versions().len(), 1);

        let version = document.primary_version().unwrap();
        assert_eq!(version.property(FILE_NAME_PROPERTY), Some("summary"));
        assert_eq!(version.contents().len(), 1);
        assert_eq!(version.contents()[0].file_name(), "summary.pdf");
        assert_eq!(version.contents()[0].data().as_ref(), b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_export_root_key() {
        let (provider, _, _) = connected(store()).await;

        let document = provider.build_document("root.txt").await.unwrap();

        assert!(document.folder_paths().is_empty());
        let version = document.primary_version().unwrap();
        assert_eq!(version.property(FILE_NAME_PROPERTY), Some("root"));
        assert_eq!(version.contents()[0].file_name(), "root.txt");
    }

    #[tokio::test]
    async fn test_export_without_extension() {
        let (provider, _, _) = connected(store()).await;

        let document = provider.build_document("notes/README").await.unwrap();

        let version = document.primary_version().unwrap();
        assert_eq!(version.property(FILE_NAME_PROPERTY), Some("README"));
        assert_eq!(version.contents()[0].file_name(), "README");
    }

    #[tokio::test]
    async fn test_export_missing_object_propagates() {
        let (provider, connector, collector) = connected(store()).await;

        let err = provider.export_document("reports/gone.pdf").await.unwrap_err();

        assert!(matches!(
            err,
            ProviderError::Storage(StorageError::NotFound(ref key)) if key == "reports/gone.pdf"
        ));
        assert_eq!(connector.store.fetches.load(Ordering::SeqCst), 1);
        assert!(collector.exported.lock().unwrap().is_empty());
        let errors = collector.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].id, "reports/gone.pdf");
    }

    #[tokio::test]
    async fn test_export_requires_connection() {
        let connector = Arc::new(MemoryConnector::new(store()));
        let provider = S3Provider::with_connector(connector.clone());

        let err = provider.export_document("root.txt").await.unwrap_err();

        assert!(matches!(
            err,
            ProviderError::NotConnected {
                state: ConnectionState::Disconnected,
                ..
            }
        ));
        assert_eq!(connector.store.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_export_after_failed_connect() {
        let connector = Arc::new(MemoryConnector::new(
            store().failing_list(StorageError::Io("connection refused".to_string())),
        ));
        let mut provider = S3Provider::with_connector(connector);
        assert!(provider.connect(&source()).await.is_err());

        let err = provider.export_document("root.txt").await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::NotConnected {
                state: ConnectionState::Unavailable,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_veto_returns_false() {
        let (mut provider, _, collector) = connected(store()).await;
        provider.subscribe(Arc::new(VetoAll));

        assert!(!provider.export_document("root.txt").await.unwrap());
        // Earlier observers still saw the document.
        assert_eq!(collector.exported.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_custom_completion_receives_args() {
        #[derive(Default)]
        struct Capture(Mutex<Option<ExportDocumentArgs>>);

        #[async_trait]
        impl ExportCompletion for Capture {
            async fn export_complete(
                &self,
                _events: &EventChannel,
                args: ExportDocumentArgs,
            ) -> bool {
                *self.0.lock().unwrap() = Some(args);
                false
            }
        }

        let capture = Arc::new(Capture::default());
        let connector = Arc::new(MemoryConnector::new(store()));
        let mut provider =
            S3Provider::with_connector(connector).with_completion(capture.clone());
        provider.connect(&source()).await.unwrap();

        assert!(!provider.export_document("root.txt").await.unwrap());

        let args = capture.0.lock().unwrap().take().unwrap();
        assert_eq!(args.id, "root.txt");
        assert_eq!(args.document.unwrap().id(), "root.txt");
    }

    #[tokio::test]
    async fn test_each_export_builds_fresh_document() {
        let (provider, _, collector) = connected(store()).await;

        provider.export_document("root.txt").await.unwrap();
        provider.export_document("root.txt").await.unwrap();

        let exported = collector.exported.lock().unwrap();
        assert_eq!(exported.len(), 2);
        for document in exported.iter() {
            assert_eq!(document.versions().len(), 1);
            assert_eq!(document.primary_version().unwrap().contents().len(), 1);
        }
        assert_eq!(collector.messages.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_dispatch_completion_without_document() {
        let events = EventChannel::new();
        assert!(
            !DispatchCompletion
                .export_complete(&events, ExportDocumentArgs::new("x"))
                .await
        );
    }
}
