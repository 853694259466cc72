//! Configuration loaded from `config.toml`
//!
//! Looked up in the platform config dir, e.g. `~/.config/codediff/config.toml`
//! on Linux. Every key is optional; command line flags take precedence.

use anyhow::{Context, Result};
use codediff_core::DiffAlgorithm;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::export::DEFAULT_STYLESHEETS;
use crate::views::ViewMode;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub view: Option<ViewMode>,
    /// Default highlighting language tag
    pub language: Option<String>,
    pub algorithm: Option<DiffAlgorithm>,
    /// syntect theme name
    pub theme: Option<String>,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Stylesheets linked from exported documents
    pub stylesheets: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            stylesheets: DEFAULT_STYLESHEETS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("codediff").join("config.toml"))
}

fn read(path: &Path) -> Result<Config> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&data).with_context(|| format!("Failed to parse config {}", path.display()))
}

/// Load configuration.
///
/// An explicit path must exist and parse. The default location is optional,
/// and a broken file there only logs a warning.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return read(path);
    }

    let Some(path) = config_path() else {
        return Ok(Config::default());
    };
    if !path.exists() {
        debug!(path = %path.display(), "no config file");
        return Ok(Config::default());
    }

    match read(&path) {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!("{e:#}, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
view = "split"
language = "rust"
algorithm = "patience"
theme = "base16-ocean.light"

[export]
stylesheets = ["style.css"]
"#,
        )
        .unwrap();

        assert_eq!(config.view, Some(ViewMode::Split));
        assert_eq!(config.language.as_deref(), Some("rust"));
        assert_eq!(config.algorithm, Some(DiffAlgorithm::Patience));
        assert_eq!(config.theme.as_deref(), Some("base16-ocean.light"));
        assert_eq!(config.export.stylesheets, vec!["style.css"]);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.export.stylesheets.len(), DEFAULT_STYLESHEETS.len());
    }

    #[test]
    fn test_explicit_path_errors() {
        assert!(load(Some(Path::new("/nonexistent/codediff.toml"))).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "view = \"diagonal\"").unwrap();
        let err = load(Some(file.path())).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_explicit_path_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "language = \"go\"").unwrap();
        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.language.as_deref(), Some("go"));
        assert_eq!(config.view, None);
    }
}
