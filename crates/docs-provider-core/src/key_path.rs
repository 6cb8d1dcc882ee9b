//! Projection of flat object keys onto a folder hierarchy.
//!
//! The object-store namespace is flat. Folders exist only as the prefix of a
//! key up to its last delimiter; nothing else stores them.

/// Delimiter separating folder segments inside an object key.
pub const KEY_DELIMITER: char = '/';

/// Returns the part of `key` before the last delimiter, or `""` for keys at
/// the bucket root.
pub fn folder_path_of(key: &str) -> &str {
    match key.rfind(KEY_DELIMITER) {
        Some(pos) => &key[..pos],
        None => "",
    }
}

/// An object key split into its folder path and file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPath<'a> {
    key: &'a str,
    folder_path: &'a str,
    file_name: &'a str,
}

impl<'a> KeyPath<'a> {
    pub fn parse(key: &'a str) -> Self {
        let (folder_path, file_name) = match key.rfind(KEY_DELIMITER) {
            Some(pos) => (&key[..pos], &key[pos + 1..]),
            None => ("", key),
        };
        Self {
            key,
            folder_path,
            file_name,
        }
    }

    /// The full object key.
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// Folder path, empty for root-level objects.
    pub fn folder_path(&self) -> &'a str {
        self.folder_path
    }

    /// Trailing segment of the key, extension included.
    pub fn file_name(&self) -> &'a str {
        self.file_name
    }

    /// File name with its last extension removed.
    ///
    /// `None` when the name has no extension, or when stripping it would leave
    /// nothing (dot-files such as `.env`).
    pub fn base_file_name(&self) -> Option<&'a str> {
        match self.file_name.rfind('.') {
            Some(pos) if pos > 0 => Some(&self.file_name[..pos]),
            _ => None,
        }
    }

    /// The name recorded as a version's `FileName`: the extension-stripped
    /// name when one exists, else the raw file name.
    pub fn display_base_name(&self) -> &'a str {
        self.base_file_name().unwrap_or(self.file_name)
    }

    pub fn is_root(&self) -> bool {
        self.folder_path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_path_of() {
        assert_eq!(folder_path_of("reports/2023/summary.pdf"), "reports/2023");
        assert_eq!(folder_path_of("a/b"), "a");
        assert_eq!(folder_path_of("root.txt"), "");
        assert_eq!(folder_path_of(""), "");
        assert_eq!(folder_path_of("/leading.txt"), "");
        assert_eq!(folder_path_of("folder/"), "folder");
        assert_eq!(folder_path_of("a//b.txt"), "a/");
    }

    #[test]
    fn test_parse_nested_key() {
        let path = KeyPath::parse("reports/2023/summary.pdf");
        assert_eq!(path.key(), "reports/2023/summary.pdf");
        assert_eq!(path.folder_path(), "reports/2023");
        assert_eq!(path.file_name(), "summary.pdf");
        assert_eq!(path.base_file_name(), Some("summary"));
        assert_eq!(path.display_base_name(), "summary");
        assert!(!path.is_root());
    }

    #[test]
    fn test_parse_root_key() {
        let path = KeyPath::parse("root.txt");
        assert_eq!(path.folder_path(), "");
        assert_eq!(path.file_name(), "root.txt");
        assert_eq!(path.display_base_name(), "root");
        assert!(path.is_root());
    }

    #[test]
    fn test_base_file_name_edge_cases() {
        assert_eq!(KeyPath::parse("docs/README").base_file_name(), None);
        assert_eq!(KeyPath::parse("docs/README").display_base_name(), "README");
        assert_eq!(KeyPath::parse("a/archive.tar.gz").base_file_name(), Some("archive.tar"));
        assert_eq!(KeyPath::parse("a/.env").base_file_name(), None);
        assert_eq!(KeyPath::parse("a/.env").display_base_name(), ".env");
        assert_eq!(KeyPath::parse("a/trailing.").base_file_name(), Some("trailing"));
    }

    #[test]
    fn test_folder_marker_key() {
        let path = KeyPath::parse("reports/");
        assert_eq!(path.folder_path(), "reports");
        assert_eq!(path.file_name(), "");
        assert_eq!(path.display_base_name(), "");
    }

    #[test]
    fn test_folder_path_matches_free_function() {
        for key in ["x", "x/y", "x/y/z.bin", "/", "a.b/c"] {
            assert_eq!(KeyPath::parse(key).folder_path(), folder_path_of(key), "key {key}");
        }
    }
}
