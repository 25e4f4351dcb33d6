//! Console presentation of matches

use colored::Colorize;
use greg_core::{FileInfo, Match};
use std::io::{self, Write};

pub struct Console<W: Write> {
    out: W,
    enable_colour: bool,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, enable_colour: bool) -> Self {
        Self { out, enable_colour }
    }

    /// Path, then one `line:text` row per position (1-based lines), then a blank line.
    pub fn write(&mut self, file: &FileInfo, found: &Match) -> io::Result<()> {
        if self.enable_colour {
            writeln!(self.out, "{}", file.path().blue())?;
        } else {
            writeln!(self.out, "{}", file.path())?;
        }

        for p in &found.positions {
            let line = (p.line + 1).to_string();
            if !self.enable_colour {
                writeln!(self.out, "{}:{}", line, p.text)?;
                continue;
            }

            // Columns from a foreign matcher may not sit on char boundaries
            match (
                p.text.get(..p.column_start),
                p.text.get(p.column_start..p.column_end),
                p.text.get(p.column_end..),
            ) {
                (Some(before), Some(hit), Some(after)) => {
                    writeln!(self.out, "{}:{}{}{}", line.magenta(), before, hit.red(), after)?
                }
                _ => writeln!(self.out, "{}:{}", line.magenta(), p.text)?,
            }
        }

        writeln!(self.out)?;
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greg_core::{EntryKind, FileContents, FileExtension, FileMetadata, MatchPosition};

    fn file(path: &str) -> FileInfo {
        FileInfo {
            metadata: FileMetadata {
                kind: EntryKind::File,
                name: path.to_string(),
                extension: FileExtension::new("go"),
                path: path.to_string(),
            },
            contents: FileContents::default(),
        }
    }

    fn position(line: usize, start: usize, end: usize, text: &str) -> MatchPosition {
        MatchPosition {
            line,
            column_start: start,
            column_end: end,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_plain_output() {
        let found = Match {
            positions: vec![position(0, 0, 3, "foo bar"), position(4, 4, 7, "bar foo")],
        };
        let mut console = Console::new(Vec::new(), false);
        console.write(&file("main.go"), &found).unwrap();

        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(out, "main.go\n1:foo bar\n5:bar foo\n\n");
    }

    #[test]
    fn test_coloured_output_highlights_match() {
        colored::control::set_override(true);
        let found = Match {
            positions: vec![position(1, 4, 7, "bar foo baz")],
        };
        let mut console = Console::new(Vec::new(), true);
        console.write(&file("main.go"), &found).unwrap();

        let out = String::from_utf8(console.into_inner()).unwrap();
        assert!(out.contains(&"main.go".blue().to_string()));
        assert!(out.contains(&format!("{}:bar {} baz", "2".magenta(), "foo".red())));
    }

    #[test]
    fn test_coloured_output_with_invalid_offsets() {
        colored::control::set_override(true);
        let found = Match {
            positions: vec![position(0, 1, 2, "é")],
        };
        let mut console = Console::new(Vec::new(), true);
        console.write(&file("a.go"), &found).unwrap();

        let out = String::from_utf8(console.into_inner()).unwrap();
        assert!(out.contains(&format!("{}:é", "1".magenta())));
    }
}
