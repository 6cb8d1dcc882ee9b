use std::collections::{BTreeMap, BTreeSet};

use bytes::Bytes;

/// Version property holding the document's file name.
pub const FILE_NAME_PROPERTY: &str = "FileName";

/// A byte buffer paired with a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedStream {
    name: String,
    data: Bytes,
}

impl NamedStream {
    pub fn new(data: impl Into<Bytes>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

/// A content element of a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    stream: NamedStream,
}

impl Content {
    pub fn new(stream: NamedStream) -> Self {
        Self { stream }
    }

    /// Display name of the content, extension included.
    pub fn file_name(&self) -> &str {
        self.stream.name()
    }

    pub fn data(&self) -> &Bytes {
        self.stream.data()
    }

    pub fn len(&self) -> usize {
        self.stream.data().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stream.data().is_empty()
    }

    pub fn into_stream(self) -> NamedStream {
        self.stream
    }
}

/// A version of a document: named properties plus content elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Version {
    properties: BTreeMap<String, String>,
    contents: Vec<Content>,
}

impl Version {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, creating it if absent.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn add_content(&mut self, content: Content) {
        self.contents.push(content);
    }

    pub fn contents(&self) -> &[Content] {
        &self.contents
    }
}

/// A document assembled from one stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: String,
    document_class: String,
    folder_paths: BTreeSet<String>,
    versions: Vec<Version>,
}

impl Document {
    pub fn new(id: impl Into<String>, document_class: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            document_class: document_class.into(),
            folder_paths: BTreeSet::new(),
            versions: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn document_class(&self) -> &str {
        &self.document_class
    }

    pub fn folder_paths(&self) -> &BTreeSet<String> {
        &self.folder_paths
    }

    pub fn add_folder_path(&mut self, path: impl Into<String>) {
        self.folder_paths.insert(path.into());
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// Create a version not yet attached to this document.
    pub fn create_version(&self) -> Version {
        Version::new()
    }

    /// Return the primary version, attaching a fresh one only when the
    /// document has no versions yet.
    pub fn ensure_primary_version(&mut self) -> &mut Version {
        if self.versions.is_empty() {
            let version = self.create_version();
            self.versions.push(version);
        }
        &mut self.versions[0]
    }

    pub fn primary_version(&self) -> Option<&Version> {
        self.versions.first()
    }
}
