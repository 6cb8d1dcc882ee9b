use std::collections::BTreeSet;
use std::fmt;

/// Optional operations a provider may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Export a single document by id.
    DocumentExport,
    /// Create and run searches against the repository.
    Search,
    /// Browse folders and report the folder delimiter.
    FolderBrowsing,
    /// Count documents below a folder.
    DocumentCount,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::DocumentExport => "document export",
            Capability::Search => "search",
            Capability::FolderBrowsing => "folder browsing",
            Capability::DocumentCount => "document count",
        };
        f.write_str(name)
    }
}

/// The set of capabilities a provider declares.
///
/// Callers query the set before invoking an optional operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, capability: Capability) -> Self {
        self.0.insert(capability);
        self
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
