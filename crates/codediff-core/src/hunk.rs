//! Hunk construction from change segments

use crate::change::{ChangeKind, ChangeSegment};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One line within a hunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    pub kind: ChangeKind,
    /// Line text without the diff marker
    pub content: String,
    /// Present iff the line is not Added
    pub old_line_number: Option<usize>,
    /// Present iff the line is not Removed
    pub new_line_number: Option<usize>,
}

impl DiffLine {
    pub fn added(content: impl Into<String>, new_line: usize) -> Self {
        Self {
            kind: ChangeKind::Added,
            content: content.into(),
            old_line_number: None,
            new_line_number: Some(new_line),
        }
    }

    pub fn removed(content: impl Into<String>, old_line: usize) -> Self {
        Self {
            kind: ChangeKind::Removed,
            content: content.into(),
            old_line_number: Some(old_line),
            new_line_number: None,
        }
    }

    pub fn unchanged(content: impl Into<String>, old_line: usize, new_line: usize) -> Self {
        Self {
            kind: ChangeKind::Unchanged,
            content: content.into(),
            old_line_number: Some(old_line),
            new_line_number: Some(new_line),
        }
    }

    /// Marker-prefixed text, as it appears in a unified diff
    pub fn display_text(&self) -> String {
        let mut text = String::with_capacity(self.content.len() + 1);
        text.push(self.kind.marker());
        text.push_str(&self.content);
        text
    }
}

/// A contiguous block of a unified diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    pub old_start: usize,
    pub old_line_count: usize,
    pub new_start: usize,
    pub new_line_count: usize,
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    /// Build a hunk around `lines`, deriving starts and counts from them.
    ///
    /// Starts default to 1 when no line carries the respective number.
    pub fn from_lines(lines: Vec<DiffLine>) -> Self {
        let old_start = lines
            .iter()
            .find_map(|l| l.old_line_number)
            .unwrap_or(1);
        let new_start = lines
            .iter()
            .find_map(|l| l.new_line_number)
            .unwrap_or(1);
        let old_line_count = lines.iter().filter(|l| l.kind.has_old_line()).count();
        let new_line_count = lines.iter().filter(|l| l.kind.has_new_line()).count();

        Self {
            old_start,
            old_line_count,
            new_start,
            new_line_count,
            lines,
        }
    }

    /// The `@@ -a,b +c,d @@` header line, without a trailing newline
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_line_count, self.new_start, self.new_line_count
        )
    }

    /// Number of Added lines
    pub fn insertions(&self) -> usize {
        self.count(ChangeKind::Added)
    }

    /// Number of Removed lines
    pub fn deletions(&self) -> usize {
        self.count(ChangeKind::Removed)
    }

    fn count(&self, kind: ChangeKind) -> usize {
        self.lines.iter().filter(|l| l.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Number every line of `segments` and wrap them in hunks.
///
/// No context windowing is done: any lines at all produce exactly one hunk
/// spanning the whole file, and no lines produce no hunks.
pub fn build_hunks(segments: &[ChangeSegment]) -> Vec<Hunk> {
    let mut old_line_num = 1usize;
    let mut new_line_num = 1usize;
    let mut lines = Vec::new();

    for segment in segments {
        for line in &segment.lines {
            match segment.kind {
                ChangeKind::Added => {
                    lines.push(DiffLine::added(line.as_str(), new_line_num));
                    new_line_num += 1;
                }
                ChangeKind::Removed => {
                    lines.push(DiffLine::removed(line.as_str(), old_line_num));
                    old_line_num += 1;
                }
                ChangeKind::Unchanged => {
                    lines.push(DiffLine::unchanged(
                        line.as_str(),
                        old_line_num,
                        new_line_num,
                    ));
                    old_line_num += 1;
                    new_line_num += 1;
                }
            }
        }
    }

    debug!(
        segments = segments.len(),
        lines = lines.len(),
        "built diff lines"
    );

    if lines.is_empty() {
        return Vec::new();
    }

    vec![Hunk::from_lines(lines)]
}
