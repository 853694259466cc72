//! codediff CLI: compare two versions of a file as unified or split output.
//!
//! Logging: set `RUST_LOG=codediff=debug` (or pass `--verbose`) to see logs on stderr.

mod cli;
mod config;
mod export;
mod syntax;
mod views;

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use codediff_core::{DiffEngine, DiffResult};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, OutputFormat, STDIN};
use crate::syntax::{Highlighter, DEFAULT_LANGUAGE, DEFAULT_THEME};
use crate::views::{render_columns, render_html_or_error};

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "codediff=debug,codediff_core=debug"
        } else {
            "codediff=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Language tag from the file extension, if there is one
fn language_from_name(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_owned())) {
        Ok(()) => info!("copied diff to clipboard"),
        Err(e) => {
            warn!(error = %e, "failed to copy to clipboard");
            eprintln!("Failed to copy: {e}");
        }
    }
}

fn summary(result: &DiffResult) -> String {
    format!(
        "{}: {} insertion(s), {} deletion(s)",
        result.new_path,
        result.insertions(),
        result.deletions()
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.before.as_os_str() == STDIN && cli.after.as_os_str() == STDIN {
        bail!("only one of BEFORE and AFTER can be read from stdin");
    }

    let config = config::load(cli.config.as_deref())?;
    let before = read_input(&cli.before)?;
    let after = read_input(&cli.after)?;

    let name = cli.file_name();
    let view = cli.view.or(config.view).unwrap_or_default();
    let algorithm = cli.algorithm.or(config.algorithm).unwrap_or_default();
    let language = cli
        .language
        .clone()
        .or_else(|| config.language.clone())
        .or_else(|| language_from_name(&name))
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let engine = DiffEngine::new().with_algorithm(algorithm);
    let plain = engine.compute_plain_text(Some(&before), Some(&after), &name);

    let needs_html = cli.format == OutputFormat::Html || cli.export.is_some();
    let html = needs_html.then(|| {
        let highlighter = Highlighter::new(config.theme.as_deref().unwrap_or(DEFAULT_THEME));
        if !highlighter.supports(&language) {
            debug!(%language, "unsupported language, rendering without highlighting");
        }
        render_html_or_error(&plain, view, &language, &highlighter)
    });

    let mut stdout = std::io::stdout().lock();
    match cli.format {
        OutputFormat::Text => stdout.write_all(plain.as_bytes())?,
        OutputFormat::Html => {
            if let Some(html) = &html {
                stdout.write_all(html.0.as_bytes())?;
            }
        }
        OutputFormat::Columns | OutputFormat::Json => {
            let result = engine.compute_structured(Some(&before), Some(&after), &name);
            info!("{}", summary(&result));
            if cli.format == OutputFormat::Json {
                serde_json::to_writer_pretty(&mut stdout, &result)?;
                writeln!(stdout)?;
            } else {
                stdout.write_all(render_columns(&result, view).as_bytes())?;
            }
        }
    }
    stdout.flush()?;

    if cli.copy {
        copy_to_clipboard(&plain);
    }

    if let (Some(dir), Some(html)) = (&cli.export, &html) {
        let path = export::write_export(dir, &name, html, &config.export.stylesheets)?;
        eprintln!("Exported {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_name() {
        assert_eq!(language_from_name("main.RS").as_deref(), Some("rs"));
        assert_eq!(language_from_name("Makefile"), None);
    }
}
