use std::path::{Path, PathBuf};

use async_trait::async_trait;
use docs_provider_core::{EventChannel, KEY_DELIMITER};
use tracing::{error, info, warn};

use crate::export::{DispatchCompletion, ExportCompletion, ExportDocumentArgs};

/// Completion that writes each content element to
/// `<root>/<folder path>/<file name>` and then raises `DocumentExported`.
#[derive(Debug, Clone)]
pub struct DirectoryCompletion {
    root: PathBuf,
}

impl DirectoryCompletion {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Join slash-delimited `segments` below `root`, dropping empty, `.` and
    /// `..` segments so keys cannot escape the output directory.
    fn target(root: &Path, folder_path: &str, file_name: &str) -> PathBuf {
        let mut path = root.to_path_buf();
        for segment in folder_path.split(KEY_DELIMITER) {
            if !matches!(segment, "" | "." | "..") {
                path.push(segment);
            }
        }
        path.push(file_name);
        path
    }
}

#[async_trait]
impl ExportCompletion for DirectoryCompletion {
    async fn export_complete(&self, events: &EventChannel, args: ExportDocumentArgs) -> bool {
        let Some(document) = &args.document else {
            warn!(id = %args.id, "Export completed without a document");
            return false;
        };

        let folder_path = document
            .folder_paths()
            .iter()
            .next()
            .map(String::as_str)
            .unwrap_or("");

        for version in document.versions() {
            for content in version.contents() {
                if matches!(content.file_name(), "" | "." | "..") {
                    warn!(id = %document.id(), "Skipping content without a file name");
                    continue;
                }

                let target = Self::target(&self.root, folder_path, content.file_name());
                if let Some(parent) = target.parent() {
                    if let Err(e) = tokio::fs::create_dir_all(parent).await {
                        error!(path = %parent.display(), error = %e, "Failed to create directory");
                        return false;
                    }
                }
                if let Err(e) = tokio::fs::write(&target, content.data()).await {
                    error!(path = %target.display(), error = %e, "Failed to write content");
                    return false;
                }
                info!(id = %document.id(), path = %target.display(), bytes = content.len(), "Wrote content");
            }
        }

        DispatchCompletion.export_complete(events, args).await
    }
}
