//! Unified diff text: serialization and parsing

use crate::change::ChangeKind;
use crate::hunk::{DiffLine, Hunk};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const OLD_HEADER: &str = "--- ";
const NEW_HEADER: &str = "+++ ";
const NO_NEWLINE_MARKER: char = '\\';

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Missing `{0}` file header")]
    MissingFileHeader(&'static str),
    #[error("Invalid hunk header on line {line}: {text}")]
    InvalidHunkHeader { line: usize, text: String },
    #[error("Invalid line marker on line {line}: {text}")]
    InvalidLine { line: usize, text: String },
    #[error("Hunk starting on line {line} ended early: expected {expected_old} old and {expected_new} new lines")]
    TruncatedHunk {
        line: usize,
        expected_old: usize,
        expected_new: usize,
    },
    #[error("Hunk starting on line {line} has more lines than its header declares")]
    HunkOverflow { line: usize },
}

/// A single-file unified diff read back from text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPatch {
    pub old_path: String,
    pub new_path: String,
    pub hunks: Vec<Hunk>,
}

/// Render hunks as unified diff text.
///
/// The output always starts with the `---`/`+++` header pair, even when there
/// are no hunks, and every hunk line ends with `\n`.
pub fn serialize(old_path: &str, new_path: &str, hunks: &[Hunk]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{OLD_HEADER}a/{old_path}\n"));
    out.push_str(&format!("{NEW_HEADER}b/{new_path}\n"));

    for hunk in hunks {
        out.push_str(&hunk.header());
        out.push('\n');
        for line in &hunk.lines {
            out.push(line.kind.marker());
            out.push_str(&line.content);
            out.push('\n');
        }
    }

    out
}

/// Parse single-file unified diff text, as produced by [`serialize`].
///
/// Also accepts `\ No newline at end of file` markers and headers whose
/// counts are omitted (`@@ -3 +3 @@`).
pub fn parse(text: &str) -> Result<ParsedPatch, ParseError> {
    let mut raw: Vec<&str> = text.split('\n').collect();
    if raw.last().is_some_and(|l| l.is_empty()) {
        raw.pop();
    }
    let mut lines = raw.into_iter().enumerate().map(|(i, l)| (i + 1, l)).peekable();

    let old_path = match lines.next() {
        Some((_, line)) if line.starts_with(OLD_HEADER) => file_path(&line[OLD_HEADER.len()..], "a/"),
        _ => return Err(ParseError::MissingFileHeader(OLD_HEADER.trim_end())),
    };
    let new_path = match lines.next() {
        Some((_, line)) if line.starts_with(NEW_HEADER) => file_path(&line[NEW_HEADER.len()..], "b/"),
        _ => return Err(ParseError::MissingFileHeader(NEW_HEADER.trim_end())),
    };

    let mut hunks = Vec::new();
    while let Some((header_line, header)) = lines.next() {
        if header.starts_with(NO_NEWLINE_MARKER) {
            continue;
        }
        let (old_start, old_count, new_start, new_count) =
            parse_hunk_header(header).ok_or_else(|| ParseError::InvalidHunkHeader {
                line: header_line,
                text: header.to_string(),
            })?;

        let mut old_line = old_start;
        let mut new_line = new_start;
        let mut old_seen = 0usize;
        let mut new_seen = 0usize;
        let mut hunk_lines = Vec::new();

        while old_seen < old_count || new_seen < new_count {
            let Some((line_no, line)) = lines.next() else {
                return Err(ParseError::TruncatedHunk {
                    line: header_line,
                    expected_old: old_count,
                    expected_new: new_count,
                });
            };
            if line.starts_with(NO_NEWLINE_MARKER) {
                continue;
            }

            // Some tools strip the space from empty context lines
            let (kind, content) = match line.chars().next() {
                None => (ChangeKind::Unchanged, ""),
                Some(marker) => match ChangeKind::from_marker(marker) {
                    Some(kind) => (kind, &line[1..]),
                    None => {
                        return Err(ParseError::InvalidLine {
                            line: line_no,
                            text: line.to_string(),
                        })
                    }
                },
            };

            if kind.has_old_line() {
                old_seen += 1;
            }
            if kind.has_new_line() {
                new_seen += 1;
            }
            if old_seen > old_count || new_seen > new_count {
                return Err(ParseError::HunkOverflow { line: header_line });
            }

            let diff_line = match kind {
                ChangeKind::Added => DiffLine::added(content, new_line),
                ChangeKind::Removed => DiffLine::removed(content, old_line),
                ChangeKind::Unchanged => DiffLine::unchanged(content, old_line, new_line),
            };
            if kind.has_old_line() {
                old_line += 1;
            }
            if kind.has_new_line() {
                new_line += 1;
            }
            hunk_lines.push(diff_line);
        }

        if let Some((line_no, next)) = lines.peek() {
            if !next.starts_with("@@") && !next.starts_with(NO_NEWLINE_MARKER) {
                return Err(if ChangeKind::from_marker(next.chars().next().unwrap_or(' ')).is_some() {
                    ParseError::HunkOverflow { line: header_line }
                } else {
                    ParseError::InvalidLine {
                        line: *line_no,
                        text: next.to_string(),
                    }
                });
            }
        }

        hunks.push(Hunk {
            old_start,
            old_line_count: old_count,
            new_start,
            new_line_count: new_count,
            lines: hunk_lines,
        });
    }

    Ok(ParsedPatch {
        old_path,
        new_path,
        hunks,
    })
}

/// Path from a `---`/`+++` label, dropping a trailing `\t<date>` stamp
fn file_path(raw: &str, prefix: &str) -> String {
    let raw = match raw.rsplit_once('\t') {
        Some((path, stamp)) if is_timestamp(stamp) => path,
        _ => raw,
    };
    raw.strip_prefix(prefix).unwrap_or(raw).to_string()
}

/// `YYYY-MM-DD...` as written by diff(1) and git
fn is_timestamp(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b'-'
        && bytes[8..10].iter().all(u8::is_ascii_digit)
}

fn parse_hunk_header(line: &str) -> Option<(usize, usize, usize, usize)> {
    let rest = line.strip_prefix("@@ -")?;
    let (ranges, _) = rest.split_once(" @@")?;
    let (old, new) = ranges.split_once(" +")?;
    let (old_start, old_count) = parse_range(old)?;
    let (new_start, new_count) = parse_range(new)?;
    Some((old_start, old_count, new_start, new_count))
}

fn parse_range(range: &str) -> Option<(usize, usize)> {
    match range.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((range.parse().ok()?, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::ChangeSegment;
    use crate::diff::DiffEngine;
    use crate::hunk::build_hunks;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serialize_empty() {
        assert_eq!(
            serialize("file.txt", "file.txt", &[]),
            "--- a/file.txt\n+++ b/file.txt\n"
        );
    }

    #[test]
    fn test_serialize_hunk() {
        let hunks = build_hunks(&[
            ChangeSegment::unchanged("a\n"),
            ChangeSegment::removed("b\n"),
            ChangeSegment::added("c\n\n"),
        ]);
        assert_eq!(
            serialize("old.rs", "new.rs", &hunks),
            "--- a/old.rs\n+++ b/new.rs\n@@ -1,2 +1,3 @@\n a\n-b\n+c\n+\n"
        );
    }

    #[test]
    fn test_parse_roundtrip() {
        let hunks = build_hunks(&[
            ChangeSegment::removed("x\n"),
            ChangeSegment::unchanged("\n  y"),
            ChangeSegment::added("z"),
        ]);
        let text = serialize("f.js", "f.js", &hunks);
        let parsed = parse(&text).unwrap();

        assert_eq!(parsed.old_path, "f.js");
        assert_eq!(parsed.new_path, "f.js");
        assert_eq!(parsed.hunks, hunks);
    }

    #[test]
    fn test_parse_headers_only() {
        let parsed = parse("--- a/file.txt\n+++ b/file.txt\n").unwrap();
        assert!(parsed.hunks.is_empty());
    }

    #[test]
    fn test_parse_foreign_diff() {
        let text = "--- a/src/lib.rs\t2024-01-01\n+++ b/src/lib.rs\n@@ -3 +3,2 @@ fn main\n-old\n+new\n+more\n\\ No newline at end of file\n";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.old_path, "src/lib.rs");
        let hunk = &parsed.hunks[0];
        assert_eq!(hunk.lines[0], DiffLine::removed("old", 3));
        assert_eq!(hunk.lines[2], DiffLine::added("more", 4));
    }

    #[test]
    fn test_parse_path_with_tab() {
        let text = DiffEngine::new().compute_plain_text(Some("a"), Some("b"), "f\tg.txt");
        let parsed = parse(&text).unwrap();
        assert_eq!(parsed.old_path, "f\tg.txt");
        assert_eq!(parsed.new_path, "f\tg.txt");

        let stamped = parse("--- a/f\tg.txt\t2024-01-01 10:00:00\n+++ b/f\tg.txt\n").unwrap();
        assert_eq!(stamped.old_path, "f\tg.txt");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse(""), Err(ParseError::MissingFileHeader("---")));
        assert_eq!(
            parse("--- a/x\n"),
            Err(ParseError::MissingFileHeader("+++"))
        );
        assert!(matches!(
            parse("--- a/x\n+++ b/x\n@@ nope @@\n"),
            Err(ParseError::InvalidHunkHeader { line: 3, .. })
        ));
        assert!(matches!(
            parse("--- a/x\n+++ b/x\n@@ -1,2 +1,2 @@\n a\n"),
            Err(ParseError::TruncatedHunk { line: 3, .. })
        ));
        assert!(matches!(
            parse("--- a/x\n+++ b/x\n@@ -1,1 +1,1 @@\n a\n+b\n"),
            Err(ParseError::HunkOverflow { line: 3 })
        ));
        assert!(matches!(
            parse("--- a/x\n+++ b/x\n@@ -1,1 +1,1 @@\n*a\n"),
            Err(ParseError::InvalidLine { line: 4, .. })
        ));
    }
}
