//! Diff computation engine

use crate::change::ChangeKind;
use crate::engine::{DiffAlgorithm, LineDiff, SimilarLineDiff};
use crate::hunk::{build_hunks, Hunk};
use crate::unified;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Label used when the caller gives no file name
pub const DEFAULT_PATH: &str = "file.txt";
pub const OLD_REVISION: &str = "Before";
pub const NEW_REVISION: &str = "After";

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// How the file changed between the two revisions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileChangeType {
    #[default]
    Modify,
}

/// Result of comparing one file pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub old_path: String,
    pub new_path: String,
    pub old_revision: String,
    pub new_revision: String,
    #[serde(rename = "type")]
    pub change_type: FileChangeType,
    pub hunks: Vec<Hunk>,
}

impl DiffResult {
    /// Total number of Added lines
    pub fn insertions(&self) -> usize {
        self.hunks.iter().map(Hunk::insertions).sum()
    }

    /// Total number of Removed lines
    pub fn deletions(&self) -> usize {
        self.hunks.iter().map(Hunk::deletions).sum()
    }

    /// Whether any line was added or removed
    pub fn has_changes(&self) -> bool {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .any(|l| l.kind.is_change())
    }

    /// Unified diff text for these hunks
    pub fn to_unified(&self) -> String {
        unified::serialize(&self.old_path, &self.new_path, &self.hunks)
    }

    /// Count lines of a given kind across all hunks
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == kind)
            .count()
    }
}

/// The main diff engine
pub struct DiffEngine<D = SimilarLineDiff> {
    line_diff: D,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self {
            line_diff: SimilarLineDiff::default(),
        }
    }
}

impl DiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(mut self, algorithm: DiffAlgorithm) -> Self {
        self.line_diff = SimilarLineDiff::new(algorithm);
        self
    }
}

impl<D: LineDiff> DiffEngine<D> {
    /// Use a different line diff primitive
    pub fn with_line_diff(line_diff: D) -> Self {
        Self { line_diff }
    }

    fn hunks(&self, old: Option<&str>, new: Option<&str>) -> Vec<Hunk> {
        let old = old.unwrap_or_default();
        let new = new.unwrap_or_default();
        let segments = self.line_diff.diff_lines(old, new);
        let hunks = build_hunks(&segments);
        debug!(
            segments = segments.len(),
            hunks = hunks.len(),
            "computed line diff"
        );
        hunks
    }

    /// Structured hunks for rendering.
    ///
    /// Missing text counts as empty; empty or line-less inputs give zero hunks.
    pub fn compute_structured(
        &self,
        old: Option<&str>,
        new: Option<&str>,
        path: &str,
    ) -> DiffResult {
        DiffResult {
            old_path: path.to_string(),
            new_path: path.to_string(),
            old_revision: OLD_REVISION.to_string(),
            new_revision: NEW_REVISION.to_string(),
            change_type: FileChangeType::Modify,
            hunks: self.hunks(old, new),
        }
    }

    /// Unified diff text for copy and export.
    ///
    /// Serialized from the same hunks as [`DiffEngine::compute_structured`].
    pub fn compute_plain_text(&self, old: Option<&str>, new: Option<&str>, path: &str) -> String {
        unified::serialize(path, path, &self.hunks(old, new))
    }

    /// Compute diff between two files, labelled with the new file's path
    pub fn diff_files(&self, old_path: &Path, new_path: &Path) -> Result<DiffResult, DiffError> {
        let old_content = read(old_path)?;
        let new_content = read(new_path)?;
        let label = new_path.to_string_lossy();

        Ok(self.compute_structured(Some(&old_content), Some(&new_content), &label))
    }
}

fn read(path: &Path) -> Result<String, DiffError> {
    std::fs::read_to_string(path).map_err(|source| DiffError::FileRead {
        path: path.display().to_string(),
        source,
    })
}
