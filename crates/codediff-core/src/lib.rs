//! Codediff Core - line diff engine with unified diff output
//!
//! This library turns two versions of a text into numbered hunks and
//! serializes them as unified diff text. Both views are derived from the
//! same hunks, so the structured and plain-text results always agree.

pub mod change;
pub mod diff;
pub mod engine;
pub mod hunk;
pub mod unified;

pub use change::{ChangeKind, ChangeSegment};
pub use diff::{DiffEngine, DiffError, DiffResult, FileChangeType, DEFAULT_PATH};
pub use engine::{DiffAlgorithm, LineDiff, SimilarLineDiff};
pub use hunk::{build_hunks, DiffLine, Hunk};
pub use unified::{parse, serialize, ParseError, ParsedPatch};
