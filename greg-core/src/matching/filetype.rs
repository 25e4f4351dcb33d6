use crate::types::{FileExtension, FileInfo};

/// True when `file` has one of the `allowed` extensions, or `allowed` is empty.
///
/// Comparison is on whole normalised extensions, so `py` never admits `pyc`.
pub fn filter_filetype(allowed: &[FileExtension], file: &FileInfo) -> bool {
    if allowed.is_empty() {
        return true;
    }

    let normalised = normalise_extension(file.extension().as_str());
    allowed.iter().any(|a| a.as_str() == normalised)
}

/// Strip surrounding whitespace and any leading dots.
pub fn normalise_extension(ext: &str) -> String {
    ext.trim_start_matches(|c: char| c == '.' || c.is_whitespace())
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::text_file;

    #[test]
    fn test_normalise_extension() {
        let cases = [
            ("", ""),
            ("\t  \n", ""),
            ("md", "md"),
            (".md", "md"),
            (".md\t", "md"),
            ("  .tar.gz ", "tar.gz"),
            ("..md", "md"),
        ];
        for (input, expected) in cases {
            assert_eq!(normalise_extension(input), expected, "{input:?}");
        }
    }

    #[test]
    fn test_normalise_extension_idempotent() {
        for input in ["", " . md", ".md", "..md", " rs ", ".", "tar.gz", ". . md"] {
            let once = normalise_extension(input);
            assert_eq!(normalise_extension(&once), once, "{input:?}");
        }
    }

    #[test]
    fn test_filter_filetype() {
        let exts = |list: &[&str]| list.iter().map(|e| FileExtension::new(e)).collect::<Vec<_>>();
        let cases: [(&[&str], &str, bool); 8] = [
            (&[], "md", true),
            (&["md"], "md", true),
            (&["a", "b", "md", "c"], "md", true),
            (&["go"], "md", false),
            (&["go", "py", "sh"], "md", false),
            (&["pyc"], "py", false),
            (&["py"], "pyc", false),
            (&["numpy"], "py", false),
        ];

        for (allowed, extension, expected) in cases {
            let file = text_file(extension, "");
            assert_eq!(
                filter_filetype(&exts(allowed), &file),
                expected,
                "allowed={allowed:?} extension={extension}"
            );
        }
    }

    #[test]
    fn test_filter_filetype_accepts_dotted_extension() {
        let mut file = text_file("md", "");
        file.metadata.extension = FileExtension::new(".md");
        assert!(filter_filetype(&[FileExtension::new("md")], &file));
    }
}
