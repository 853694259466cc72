//! Split view - old file on the left, new file on the right

use super::{code_line, info_row, line_class, line_number};
use crate::syntax::Highlighter;
use codediff_core::{ChangeKind, DiffLine, Hunk, ParsedPatch};
use maud::{html, Markup};

/// One visual row of the split view
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SplitRow<'a> {
    pub left: Option<&'a DiffLine>,
    pub right: Option<&'a DiffLine>,
}

/// Pair removed lines with the added lines that follow them.
///
/// Unchanged lines appear on both sides; a run of changes produces
/// `max(removed, added)` rows with the shorter side padded by empty cells.
pub(crate) fn split_rows(hunk: &Hunk) -> Vec<SplitRow<'_>> {
    let mut rows = Vec::new();
    let mut removed: Vec<&DiffLine> = Vec::new();
    let mut added: Vec<&DiffLine> = Vec::new();

    fn flush<'a>(
        rows: &mut Vec<SplitRow<'a>>,
        removed: &mut Vec<&'a DiffLine>,
        added: &mut Vec<&'a DiffLine>,
    ) {
        let count = removed.len().max(added.len());
        for i in 0..count {
            rows.push(SplitRow {
                left: removed.get(i).copied(),
                right: added.get(i).copied(),
            });
        }
        removed.clear();
        added.clear();
    }

    for line in &hunk.lines {
        match line.kind {
            ChangeKind::Removed => {
                // A removal after additions starts a new change run
                if !added.is_empty() {
                    flush(&mut rows, &mut removed, &mut added);
                }
                removed.push(line);
            }
            ChangeKind::Added => added.push(line),
            ChangeKind::Unchanged => {
                flush(&mut rows, &mut removed, &mut added);
                rows.push(SplitRow {
                    left: Some(line),
                    right: Some(line),
                });
            }
        }
    }
    flush(&mut rows, &mut removed, &mut added);

    rows
}

fn side_cells(line: Option<&DiffLine>, old_side: bool, language: &str, h: &Highlighter) -> Markup {
    html! {
        @match line {
            Some(line) => {
                @let class = line_class(line.kind);
                @let number = if old_side { line.old_line_number } else { line.new_line_number };
                td class=(format!("d2h-code-side-linenumber {class}")) { (line_number(number)) }
                td class=(class) { (code_line(line, language, h)) }
            }
            None => {
                td.d2h-code-side-linenumber.d2h-code-side-emptyplaceholder.d2h-emptyplaceholder {}
                td.d2h-code-side-emptyplaceholder.d2h-emptyplaceholder { div.d2h-code-side-line {} }
            }
        }
    }
}

fn side_table(rows: Markup) -> Markup {
    html! {
        div.d2h-file-side-diff {
            div.d2h-code-wrapper {
                table.d2h-diff-table {
                    tbody.d2h-diff-tbody { (rows) }
                }
            }
        }
    }
}

pub fn render_side_by_side(patch: &ParsedPatch, language: &str, highlighter: &Highlighter) -> Markup {
    let side = |old_side: bool| {
        html! {
            @if patch.hunks.is_empty() {
                @let notice = if old_side { "File without changes" } else { "" };
                (info_row(notice))
            }
            @for hunk in &patch.hunks {
                @let header = if old_side { hunk.header() } else { String::new() };
                (info_row(&header))
                @for row in split_rows(hunk) {
                    @let line = if old_side { row.left } else { row.right };
                    tr { (side_cells(line, old_side, language, highlighter)) }
                }
            }
        }
    };

    html! {
        div.d2h-files-diff {
            (side_table(side(true)))
            (side_table(side(false)))
        }
    }
}
