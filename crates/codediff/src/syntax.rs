//! Syntax highlighting for rendered diff lines

use html_escape::encode_text;
use maud::{Markup, PreEscaped};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use tracing::{debug, warn};

pub const DEFAULT_THEME: &str = "InspiredGitHub";
pub const DEFAULT_LANGUAGE: &str = "javascript";

/// Map the language names offered to users onto syntax tokens.
fn language_token(language: &str) -> &str {
    match language {
        "javascript" => "js",
        "typescript" => "ts",
        "python" => "py",
        "cpp" | "c++" => "cpp",
        "csharp" | "c#" => "cs",
        "ruby" => "rb",
        "rust" => "rs",
        "kotlin" => "kt",
        "html" | "markup" => "html",
        "yaml" | "yml" => "yaml",
        "markdown" => "md",
        "shell" | "bash" | "sh" => "sh",
        other => other,
    }
}

pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    pub fn new(theme_name: &str) -> Self {
        let syntax_set = two_face::syntax::extra_newlines();
        let mut theme_set = ThemeSet::load_defaults();
        let theme = match theme_set.themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                warn!(theme = theme_name, "unknown theme, using {DEFAULT_THEME}");
                theme_set
                    .themes
                    .remove(DEFAULT_THEME)
                    .unwrap_or_default()
            }
        };
        Self { syntax_set, theme }
    }

    /// Resolve a language tag. Returns None if the tag is unsupported.
    pub fn syntax_for(&self, language: &str) -> Option<&SyntaxReference> {
        let language = language.trim().to_lowercase();
        if language.is_empty() {
            return None;
        }
        self.syntax_set
            .find_syntax_by_token(language_token(&language))
            .or_else(|| self.syntax_set.find_syntax_by_token(&language))
    }

    pub fn supports(&self, language: &str) -> bool {
        self.syntax_for(language).is_some()
    }

    /// Highlight one line of code as HTML.
    ///
    /// Unsupported languages and highlighting errors fall back to the
    /// escaped plain text.
    pub fn highlight_line(&self, code: &str, language: &str) -> Markup {
        let Some(syntax) = self.syntax_for(language) else {
            debug!(language, "no syntax for language, rendering plain text");
            return plain(code);
        };

        match self.try_highlight(code, syntax) {
            Ok(html) => PreEscaped(html),
            Err(e) => {
                warn!(language, error = %e, "highlighting failed");
                plain(code)
            }
        }
    }

    fn try_highlight(&self, code: &str, syntax: &SyntaxReference) -> Result<String, syntect::Error> {
        let mut h = HighlightLines::new(syntax, &self.theme);
        let line = format!("{}\n", code);
        let regions = h.highlight_line(&line, &self.syntax_set)?;
        let regions: Vec<_> = regions
            .into_iter()
            .map(|(style, text)| (style, text.trim_end_matches('\n')))
            .filter(|(_, text)| !text.is_empty())
            .collect();
        styled_line_to_highlighted_html(&regions, IncludeBackground::No)
    }
}

fn plain(code: &str) -> Markup {
    PreEscaped(encode_text(code).into_owned())
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}
