//! View rendering modules

mod columns;
mod line_by_line;
mod side_by_side;

pub use columns::render_columns;
pub use line_by_line::render_line_by_line;
pub use side_by_side::render_side_by_side;

use clap::ValueEnum;
use codediff_core::{parse, ChangeKind, DiffLine, ParseError, ParsedPatch};
use html_escape::encode_double_quoted_attribute;
use maud::{html, Markup, PreEscaped};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::syntax::Highlighter;

/// Shown in place of the diff when the text cannot be rendered
pub const RENDER_ERROR_HTML: &str = r#"<p class="diff-error">Error rendering diff</p>"#;

/// Diff layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One column, removed lines above added lines
    #[default]
    Unified,
    /// Old and new side by side
    Split,
}

/// Render unified diff text as an HTML fragment in the given layout
pub fn render_html(
    diff_text: &str,
    mode: ViewMode,
    language: &str,
    highlighter: &Highlighter,
) -> Result<Markup, ParseError> {
    let patch = parse(diff_text)?;
    let body = match mode {
        ViewMode::Unified => render_line_by_line(&patch, language, highlighter),
        ViewMode::Split => render_side_by_side(&patch, language, highlighter),
    };
    Ok(wrap_file(&patch, language, body))
}

/// Like [`render_html`], but a failure becomes an inline error message
pub fn render_html_or_error(
    diff_text: &str,
    mode: ViewMode,
    language: &str,
    highlighter: &Highlighter,
) -> Markup {
    render_html(diff_text, mode, language, highlighter).unwrap_or_else(|e| {
        error!(error = %e, "error rendering diff");
        PreEscaped(RENDER_ERROR_HTML.to_string())
    })
}

fn wrap_file(patch: &ParsedPatch, language: &str, body: Markup) -> Markup {
    let (added, deleted) = patch
        .hunks
        .iter()
        .flat_map(|h| &h.lines)
        .fold((0, 0), |(a, d), l| match l.kind {
            ChangeKind::Added => (a + 1, d),
            ChangeKind::Removed => (a, d + 1),
            ChangeKind::Unchanged => (a, d),
        });
    let name = if patch.old_path == patch.new_path {
        patch.new_path.clone()
    } else {
        format!("{} → {}", patch.old_path, patch.new_path)
    };

    html! {
        div.d2h-wrapper {
            div.d2h-file-wrapper data-lang=(PreEscaped(encode_double_quoted_attribute(language))) {
                div.d2h-file-header {
                    span.d2h-file-name { (name) }
                    span.d2h-lines-added { "+" (added) }
                    span.d2h-lines-deleted { "-" (deleted) }
                }
                (body)
            }
        }
    }
}

/// CSS class for a line of the given kind
fn line_class(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Added => "d2h-ins",
        ChangeKind::Removed => "d2h-del",
        ChangeKind::Unchanged => "d2h-cntx",
    }
}

fn line_number(n: Option<usize>) -> String {
    n.map(|n| n.to_string()).unwrap_or_default()
}

/// The prefix + highlighted content cell body of a diff line
fn code_line(line: &DiffLine, language: &str, highlighter: &Highlighter) -> Markup {
    let blank = line.content.trim().is_empty();
    html! {
        div.d2h-code-line {
            span.d2h-code-line-prefix { (line.kind.marker()) }
            span.d2h-code-line-ctn {
                code class=(format!("hljs language-{language}")) {
                    @if blank {
                        (line.content)
                    } @else {
                        (highlighter.highlight_line(&line.content, language))
                    }
                }
            }
        }
    }
}

/// A full-width row for hunk headers and notices
fn info_row(text: &str) -> Markup {
    html! {
        tr {
            td.d2h-code-linenumber.d2h-info {}
            td.d2h-info { div.d2h-code-line { (text) } }
        }
    }
}
