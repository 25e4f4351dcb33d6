//! Match engine: exact substring search over fetched files.

mod exact;
mod filetype;

pub use exact::ExactMatcher;
pub use filetype::{filter_filetype, normalise_extension};

use crate::types::{FileExtension, FileInfo};

/// One occurrence of the pattern within a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPosition {
    /// 0-based line index
    pub line: usize,
    /// Byte offset of the first matched byte
    pub column_start: usize,
    /// Byte offset one past the last matched byte
    pub column_end: usize,
    /// Full text of the matched line
    pub text: String,
}

/// All occurrences of the pattern within one file; never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub positions: Vec<MatchPosition>,
}

pub trait Matcher {
    /// Find every occurrence of `pattern` in `file`, or `None` when there are none.
    fn find(&self, pattern: &str, file: &FileInfo) -> Option<Match>;
}

/// Rejects files by extension before handing them to the exact matcher.
#[derive(Debug, Clone, Default)]
pub struct FilteringMatcher {
    matcher: ExactMatcher,
    filetypes: Vec<FileExtension>,
}

impl FilteringMatcher {
    /// An empty `filetypes` list accepts every extension.
    pub fn new(filetypes: Vec<FileExtension>, ignore_case: bool) -> Self {
        Self {
            matcher: ExactMatcher::new(ignore_case),
            filetypes,
        }
    }

    pub fn filetypes(&self) -> &[FileExtension] {
        &self.filetypes
    }
}

impl Matcher for FilteringMatcher {
    fn find(&self, pattern: &str, file: &FileInfo) -> Option<Match> {
        if !filter_filetype(&self.filetypes, file) {
            return None;
        }
        self.matcher.find(pattern, file)
    }
}

#[cfg(test)]
pub(crate) fn text_file(extension: &str, text: &str) -> FileInfo {
    use crate::types::{EntryKind, FileContents, FileMetadata};

    FileInfo {
        metadata: FileMetadata {
            kind: EntryKind::File,
            name: format!("file.{}", extension),
            extension: FileExtension::new(extension),
            path: format!("src/file.{}", extension),
        },
        contents: FileContents {
            is_binary: false,
            text: text.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filtering_matcher_accepts_all_without_filetypes() {
        let matcher = FilteringMatcher::new(Vec::new(), false);
        let found = matcher.find("needle", &text_file("txt", "a needle here")).unwrap();
        assert_eq!(found.positions.len(), 1);
    }

    #[test]
    fn test_filtering_matcher_rejects_other_extensions() {
        let matcher = FilteringMatcher::new(vec![FileExtension::new("rs")], false);
        assert!(matcher.find("needle", &text_file("py", "needle")).is_none());
        assert!(matcher.find("needle", &text_file("rs", "needle")).is_some());
    }

    #[test]
    fn test_filtering_matcher_passes_ignore_case() {
        let matcher = FilteringMatcher::new(vec![FileExtension::new(".md")], true);
        let found = matcher.find("README", &text_file("md", "see readme")).unwrap();
        assert_eq!(found.positions[0].column_start, 4);
    }

    #[test]
    fn test_filtering_matcher_rejects_binary() {
        let matcher = FilteringMatcher::new(Vec::new(), false);
        let mut file = text_file("bin", "needle");
        file.contents.is_binary = true;
        assert!(matcher.find("needle", &file).is_none());
    }
}
