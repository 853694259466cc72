//! Change representation for line diffs

use serde::{Deserialize, Serialize};

/// The kind of change a line carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Line only exists in the new text
    Added,
    /// Line only exists in the old text
    Removed,
    /// Line exists in both texts (context)
    Unchanged,
}

impl ChangeKind {
    /// The unified diff marker for this kind
    pub fn marker(self) -> char {
        match self {
            ChangeKind::Added => '+',
            ChangeKind::Removed => '-',
            ChangeKind::Unchanged => ' ',
        }
    }

    /// Inverse of [`ChangeKind::marker`]
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '+' => Some(ChangeKind::Added),
            '-' => Some(ChangeKind::Removed),
            ' ' => Some(ChangeKind::Unchanged),
            _ => None,
        }
    }

    /// Whether the line has a position in the old text
    pub fn has_old_line(self) -> bool {
        self != ChangeKind::Added
    }

    /// Whether the line has a position in the new text
    pub fn has_new_line(self) -> bool {
        self != ChangeKind::Removed
    }

    /// Check if this is an actual change (not just context)
    pub fn is_change(self) -> bool {
        self != ChangeKind::Unchanged
    }
}

/// A run of consecutive lines sharing the same classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSegment {
    pub kind: ChangeKind,
    pub lines: Vec<String>,
}

impl ChangeSegment {
    pub fn new(kind: ChangeKind, lines: Vec<String>) -> Self {
        Self { kind, lines }
    }

    /// Build a segment from a newline-joined block of text.
    ///
    /// A single trailing empty element left by a final `\n` is dropped so it
    /// is not counted as a line; interior empty lines are kept.
    pub fn from_block(kind: ChangeKind, block: &str) -> Self {
        let mut lines: Vec<String> = block.split('\n').map(str::to_string).collect();
        if lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        Self { kind, lines }
    }

    pub fn added(block: &str) -> Self {
        Self::from_block(ChangeKind::Added, block)
    }

    pub fn removed(block: &str) -> Self {
        Self::from_block(ChangeKind::Removed, block)
    }

    pub fn unchanged(block: &str) -> Self {
        Self::from_block(ChangeKind::Unchanged, block)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
