use super::{Match, MatchPosition, Matcher};
use crate::types::FileInfo;
use std::borrow::Cow;
use std::ops::Range;

/// Exact substring matcher.
///
/// Occurrences never overlap each other but may be directly adjacent: after a
/// hit the scan resumes at the end of that hit. Columns are byte offsets into
/// the stored line, also when ignoring case.
#[derive(Debug, Clone, Default)]
pub struct ExactMatcher {
    ignore_case: bool,
}

impl ExactMatcher {
    pub fn new(ignore_case: bool) -> Self {
        Self { ignore_case }
    }

    fn fold<'a>(&self, s: &'a str) -> Cow<'a, str> {
        if self.ignore_case {
            Cow::Owned(s.chars().flat_map(char::to_lowercase).collect())
        } else {
            Cow::Borrowed(s)
        }
    }

    fn scan_line(&self, row: usize, line: &str, pattern: &str, positions: &mut Vec<MatchPosition>) {
        let mut push = |column_start, column_end| {
            positions.push(MatchPosition {
                line: row,
                column_start,
                column_end,
                text: line.to_string(),
            })
        };

        if self.ignore_case {
            let folded = FoldedLine::new(line);
            for hit in occurrences(&folded.text, pattern) {
                let source = folded.source(hit);
                push(source.start, source.end);
            }
        } else {
            for hit in occurrences(line, pattern) {
                push(hit.start, hit.end);
            }
        }
    }
}

/// Non-overlapping occurrences of a non-empty `pattern`, left to right.
fn occurrences<'a>(haystack: &'a str, pattern: &'a str) -> impl Iterator<Item = Range<usize>> + 'a {
    let mut offset = 0;
    std::iter::from_fn(move || {
        let start = offset + haystack[offset..].find(pattern)?;
        offset = start + pattern.len();
        Some(start..offset)
    })
}

/// A line lower-cased one char at a time.
///
/// `char::to_lowercase` ignores context, so a final `Σ` folds to `σ` like any
/// other. Folding may change a char's byte length; `spans` holds, for every
/// folded byte, the byte range of the source char it came from.
struct FoldedLine {
    text: String,
    spans: Vec<Range<usize>>,
}

impl FoldedLine {
    fn new(line: &str) -> Self {
        let mut text = String::with_capacity(line.len());
        let mut spans = Vec::with_capacity(line.len());
        for (start, c) in line.char_indices() {
            let span = start..start + c.len_utf8();
            for lower in c.to_lowercase() {
                text.push(lower);
                spans.extend(std::iter::repeat(span.clone()).take(lower.len_utf8()));
            }
        }
        Self { text, spans }
    }

    /// Range in the source line covering every char behind `hit`.
    /// `hit` must be non-empty.
    fn source(&self, hit: Range<usize>) -> Range<usize> {
        self.spans[hit.start].start..self.spans[hit.end - 1].end
    }
}

impl Matcher for ExactMatcher {
    fn find(&self, pattern: &str, file: &FileInfo) -> Option<Match> {
        if file.is_binary() || pattern.is_empty() {
            return None;
        }

        let pattern = self.fold(pattern);
        let mut positions = Vec::new();

        // `lines` splits on '\n' and drops a trailing '\r', like a line scanner
        for (row, line) in file.text().lines().enumerate() {
            self.scan_line(row, line, &pattern, &mut positions);
        }

        if positions.is_empty() {
            None
        } else {
            Some(Match { positions })
        }
    }
}
