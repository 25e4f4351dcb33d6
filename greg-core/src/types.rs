//! Value types shared by the fetcher and the match engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a tree entry as reported by the remote tree query.
///
/// `tree` and `blob` are the only kinds the traversal understands; anything
/// else (submodule `commit` entries, for one) is kept verbatim in `Unknown`
/// so it can be logged and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntryKind {
    Directory,
    File,
    Unknown(String),
}

impl EntryKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Directory => "tree",
            Self::File => "blob",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for EntryKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "tree" => Self::Directory,
            "blob" => Self::File,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<EntryKind> for String {
    fn from(kind: EntryKind) -> Self {
        kind.as_str().to_string()
    }
}

/// File extension in normalised form: surrounding whitespace and leading
/// dots removed. Only this form is ever compared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FileExtension(String);

impl FileExtension {
    pub fn new(raw: &str) -> Self {
        Self(crate::matching::normalise_extension(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for FileExtension {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for FileExtension {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<FileExtension> for String {
    fn from(ext: FileExtension) -> Self {
        ext.0
    }
}

impl fmt::Display for FileExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata present for every tree entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub kind: EntryKind,
    pub name: String,
    pub extension: FileExtension,
    pub path: String,
}

/// Blob contents; `text` is empty for binary files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContents {
    pub is_binary: bool,
    pub text: String,
}

/// A fetched file, handed by value from the fetcher to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub metadata: FileMetadata,
    pub contents: FileContents,
}

impl FileInfo {
    pub fn path(&self) -> &str {
        &self.metadata.path
    }

    pub fn extension(&self) -> &FileExtension {
        &self.metadata.extension
    }

    pub fn is_binary(&self) -> bool {
        self.contents.is_binary
    }

    pub fn text(&self) -> &str {
        &self.contents.text
    }
}

/// Traversal cursor owned by one fetch session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub repo_owner: String,
    pub repo_name: String,
    /// Branch, tag or commit hash; empty means the default branch
    pub commitish: String,
    pub path_prefix: String,
}

impl QueryParams {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            repo_owner: owner.into(),
            repo_name: repo.into(),
            ..Self::default()
        }
    }

    pub fn with_commitish(mut self, commitish: impl Into<String>) -> Self {
        self.commitish = commitish.into();
        self
    }

    pub fn has_commitish(&self) -> bool {
        !self.commitish.trim().is_empty()
    }

    /// Object expression understood by the tree query, e.g. `main:src/lib`
    pub fn expression(&self) -> String {
        format!("{}:{}", self.commitish, self.path_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_from_raw() {
        assert_eq!(EntryKind::from("tree".to_string()), EntryKind::Directory);
        assert_eq!(EntryKind::from("blob".to_string()), EntryKind::File);
        assert_eq!(
            EntryKind::from("commit".to_string()),
            EntryKind::Unknown("commit".to_string())
        );
    }

    #[test]
    fn test_entry_kind_deserializes() {
        let kinds: Vec<EntryKind> = serde_json::from_str(r#"["tree", "blob", "commit"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![
                EntryKind::Directory,
                EntryKind::File,
                EntryKind::Unknown("commit".to_string())
            ]
        );
    }

    #[test]
    fn test_file_extension_normalised_on_construction() {
        assert_eq!(FileExtension::new(" .md\t").as_str(), "md");
        assert_eq!(FileExtension::from("go"), FileExtension::new(".go"));
    }

    #[test]
    fn test_expression_for_root_and_nested() {
        let mut params = QueryParams::new("agrski", "greg").with_commitish("master");
        assert_eq!(params.expression(), "master:");
        params.path_prefix = "pkg/match".to_string();
        assert_eq!(params.expression(), "master:pkg/match");
    }

    #[test]
    fn test_has_commitish_ignores_whitespace() {
        assert!(!QueryParams::new("o", "r").with_commitish("  ").has_commitish());
        assert!(QueryParams::new("o", "r").with_commitish("abc123").has_commitish());
    }
}
