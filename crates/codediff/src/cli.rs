use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use codediff_core::DiffAlgorithm;

use crate::views::ViewMode;

/// Stands for stdin in place of a file path
pub const STDIN: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Unified diff text
    #[default]
    Text,
    /// Numbered columns for the terminal
    Columns,
    /// Rendered HTML fragment
    Html,
    /// Structured hunks as JSON
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "codediff", version)]
#[command(about = "Compare a before and after version of some code")]
pub struct Cli {
    /// Original text (`-` for stdin)
    pub before: PathBuf,

    /// Modified text (`-` for stdin)
    pub after: PathBuf,

    /// Label used in diff headers and the export file name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Highlighting language, e.g. rust, python, javascript
    #[arg(short, long)]
    pub language: Option<String>,

    /// Diff layout
    #[arg(short, long, value_enum)]
    pub view: Option<ViewMode>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Diff algorithm: myers, patience or lcs
    #[arg(long)]
    pub algorithm: Option<DiffAlgorithm>,

    /// Copy the unified diff to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Write `<name>-diff.html` into DIR (default: current directory)
    #[arg(short, long, value_name = "DIR", num_args = 0..=1, default_missing_value = ".")]
    pub export: Option<PathBuf>,

    /// Alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// The label for the compared file: `--name`, else the after file's name
    pub fn file_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        if self.after.as_os_str() != STDIN {
            if let Some(name) = self.after.file_name() {
                return name.to_string_lossy().into_owned();
            }
        }
        codediff_core::DEFAULT_PATH.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["codediff", "old.rs", "src/new.rs"]);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.export, None);
        assert_eq!(cli.file_name(), "new.rs");
    }

    #[test]
    fn test_export_default_dir() {
        let cli = Cli::parse_from(["codediff", "a", "b", "--export"]);
        assert_eq!(cli.export, Some(PathBuf::from(".")));

        let cli = Cli::parse_from(["codediff", "a", "b", "-e", "out"]);
        assert_eq!(cli.export, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_stdin_name_falls_back() {
        let cli = Cli::parse_from(["codediff", "a", "-"]);
        assert_eq!(cli.file_name(), "file.txt");

        let cli = Cli::parse_from(["codediff", "a", "-", "-n", "x.go", "--algorithm", "patience", "-v", "split"]);
        assert_eq!(cli.file_name(), "x.go");
        assert_eq!(cli.algorithm, Some(DiffAlgorithm::Patience));
        assert_eq!(cli.view, Some(ViewMode::Split));
    }
}
