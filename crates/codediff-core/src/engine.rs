//! Line diff primitive

use crate::change::{ChangeKind, ChangeSegment};
use serde::{Deserialize, Serialize};
use similar::{Algorithm, ChangeTag, TextDiff};
use std::str::FromStr;

/// Produces an ordered sequence of tagged change segments for two texts.
///
/// Implementations must return segments whose Unchanged + Removed lines
/// spell out `old` and whose Unchanged + Added lines spell out `new`, in order.
pub trait LineDiff {
    fn diff_lines(&self, old: &str, new: &str) -> Vec<ChangeSegment>;
}

/// Which diff algorithm `similar` should run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    #[default]
    Myers,
    Patience,
    Lcs,
}

impl FromStr for DiffAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "myers" => Ok(DiffAlgorithm::Myers),
            "patience" => Ok(DiffAlgorithm::Patience),
            "lcs" => Ok(DiffAlgorithm::Lcs),
            other => Err(format!(
                "unknown diff algorithm `{other}` (expected myers, patience or lcs)"
            )),
        }
    }
}

impl From<DiffAlgorithm> for Algorithm {
    fn from(algorithm: DiffAlgorithm) -> Self {
        match algorithm {
            DiffAlgorithm::Myers => Algorithm::Myers,
            DiffAlgorithm::Patience => Algorithm::Patience,
            DiffAlgorithm::Lcs => Algorithm::Lcs,
        }
    }
}

/// [`LineDiff`] backed by `similar`
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarLineDiff {
    algorithm: DiffAlgorithm,
}

impl SimilarLineDiff {
    pub fn new(algorithm: DiffAlgorithm) -> Self {
        Self { algorithm }
    }
}

fn kind_for(tag: ChangeTag) -> ChangeKind {
    match tag {
        ChangeTag::Equal => ChangeKind::Unchanged,
        ChangeTag::Delete => ChangeKind::Removed,
        ChangeTag::Insert => ChangeKind::Added,
    }
}

/// Split text into lines, ignoring the empty piece after a final newline
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

impl LineDiff for SimilarLineDiff {
    fn diff_lines(&self, old: &str, new: &str) -> Vec<ChangeSegment> {
        let old_lines = split_lines(old);
        let new_lines = split_lines(new);
        // Compare line contents so a missing final newline is not a change
        let text_diff = TextDiff::configure()
            .algorithm(self.algorithm.into())
            .diff_slices(&old_lines, &new_lines);

        let mut segments: Vec<ChangeSegment> = Vec::new();
        for change in text_diff.iter_all_changes() {
            let kind = kind_for(change.tag());
            let line = change.value().to_string();
            match segments.last_mut() {
                Some(segment) if segment.kind == kind => segment.lines.push(line),
                _ => segments.push(ChangeSegment::new(kind, vec![line])),
            }
        }

        segments
    }
}
