//! Unified view - one table, old and new line numbers in the gutter

use super::{code_line, info_row, line_class, line_number};
use crate::syntax::Highlighter;
use codediff_core::ParsedPatch;
use maud::{html, Markup};

pub fn render_line_by_line(patch: &ParsedPatch, language: &str, highlighter: &Highlighter) -> Markup {
    html! {
        div.d2h-file-diff {
            div.d2h-code-wrapper {
                table.d2h-diff-table {
                    tbody.d2h-diff-tbody {
                        @if patch.hunks.is_empty() {
                            (info_row("File without changes"))
                        }
                        @for hunk in &patch.hunks {
                            (info_row(&hunk.header()))
                            @for line in &hunk.lines {
                                @let class = line_class(line.kind);
                                tr {
                                    td class=(format!("d2h-code-linenumber {class}")) {
                                        div.line-num1 { (line_number(line.old_line_number)) }
                                        div.line-num2 { (line_number(line.new_line_number)) }
                                    }
                                    td class=(class) { (code_line(line, language, highlighter)) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
