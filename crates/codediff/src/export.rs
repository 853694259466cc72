//! Standalone HTML export

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use html_escape::encode_double_quoted_attribute;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::info;

/// Used when the file name has nothing left after stripping its extension
pub const FALLBACK_BASENAME: &str = "code-diff";

pub const DEFAULT_STYLESHEETS: &[&str] = &[
    "https://cdn.jsdelivr.net/npm/diff2html/bundles/css/diff2html.min.css",
    "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/styles/github.min.css",
];

static EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[^/.]+$").expect("extension pattern is valid"));

const STYLE: &str = r#"
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Oxygen', 'Ubuntu', 'Cantarell', 'Fira Sans', 'Droid Sans', 'Helvetica Neue', sans-serif;
      margin: 0;
      padding: 20px;
      background-color: #f5f5f5;
    }
    .container {
      max-width: 1400px;
      margin: 0 auto;
      background: white;
      padding: 20px;
      border-radius: 8px;
      box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    }
    h1 {
      margin-top: 0;
      color: #333;
    }
    .info {
      color: #666;
      font-size: 14px;
      margin-bottom: 20px;
    }
    .diff-error {
      color: #dc2626;
    }
"#;

/// File name with its final extension removed
pub fn export_basename(filename: &str) -> String {
    let base = EXTENSION.replace(filename, "");
    if base.is_empty() {
        FALLBACK_BASENAME.to_string()
    } else {
        base.into_owned()
    }
}

/// `<basename>-diff.html`, flattened to a single path component
pub fn export_file_name(filename: &str) -> String {
    let base = export_basename(filename).replace(['/', '\\'], "_");
    format!("{base}-diff.html")
}

/// Wrap a rendered diff fragment in a complete HTML document
pub fn build_document(
    filename: &str,
    diff_html: &Markup,
    stylesheets: &[String],
    generated_at: DateTime<Local>,
) -> Markup {
    let name = export_basename(filename);
    let timestamp = generated_at.format("%Y-%m-%d %H:%M:%S").to_string();

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Code Diff - " (name) }
                @for href in stylesheets {
                    link rel="stylesheet" href=(PreEscaped(encode_double_quoted_attribute(href)));
                }
                style { (PreEscaped(STYLE)) }
            }
            body {
                div.container {
                    h1 { "Code Diff: " (name) }
                    div.info { "Generated on " (timestamp) }
                    (diff_html)
                }
            }
        }
    }
}

/// Write the export document into `dir`, returning its path
pub fn write_export(
    dir: &Path,
    filename: &str,
    diff_html: &Markup,
    stylesheets: &[String],
) -> Result<PathBuf> {
    let path = dir.join(export_file_name(filename));
    let document = build_document(filename, diff_html, stylesheets, Local::now());

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    std::fs::write(&path, document.into_string())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), "exported diff");
    Ok(path)
}
