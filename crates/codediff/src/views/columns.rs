//! Plain terminal rendering with line number columns

use super::side_by_side::split_rows;
use super::ViewMode;
use codediff_core::{DiffLine, DiffResult};
use unicode_width::UnicodeWidthStr;

/// Width of a line number column
const NUM_WIDTH: usize = 4;
/// Separator between the two halves of the split layout
const DIVIDER: &str = " │ ";

fn num(n: Option<usize>) -> String {
    n.map(|n| n.to_string()).unwrap_or_default()
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

fn cell(line: Option<&DiffLine>, old_side: bool) -> String {
    match line {
        Some(line) => {
            let n = if old_side {
                line.old_line_number
            } else {
                line.new_line_number
            };
            format!("{:>NUM_WIDTH$} {}", num(n), line.display_text())
        }
        None => String::new(),
    }
}

pub fn render_columns(result: &DiffResult, mode: ViewMode) -> String {
    let mut out = String::new();

    for hunk in &result.hunks {
        out.push_str(&hunk.header());
        out.push('\n');
        match mode {
            ViewMode::Unified => {
                for line in &hunk.lines {
                    out.push_str(&format!(
                        "{:>NUM_WIDTH$} {:>NUM_WIDTH$} {}\n",
                        num(line.old_line_number),
                        num(line.new_line_number),
                        line.display_text()
                    ));
                }
            }
            ViewMode::Split => {
                let rows = split_rows(hunk);
                let left: Vec<String> = rows.iter().map(|r| cell(r.left, true)).collect();
                let width = left.iter().map(|l| l.width()).max().unwrap_or(0);
                for (row, left) in rows.iter().zip(&left) {
                    let right = cell(row.right, false);
                    let line = format!("{}{DIVIDER}{right}", pad(left, width));
                    out.push_str(line.trim_end());
                    out.push('\n');
                }
            }
        }
    }

    out
}
