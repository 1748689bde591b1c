//! CLI configuration
//!
//! Defaults for analysis options and output can live in a TOML file
//! (`~/.config/foolang/config.toml` or `--config`). Command-line flags win
//! over the file, the file wins over built-in defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};

/// Configuration file contents; every field optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default source charset
    pub charset: Option<String>,
    /// Default TAB column width
    pub tab_stop: Option<u32>,
    /// Keep whitespace/comment tokens (defaults to true)
    pub with_trivia: Option<bool>,
    /// Default output format: "human", "json" or "json-pretty"
    pub output: Option<String>,
    /// Force colored output on or off
    pub color: Option<bool>,
}

impl Config {
    /// Load configuration, from an explicit path or the default location
    ///
    /// A missing default file is fine (empty config); a missing explicit
    /// `--config` path is an error.
    pub fn load_with_file(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::FileNotFound {
                        path: path.to_path_buf(),
                    });
                }
                Self::load_from(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading configuration");
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
    }

    /// Default configuration file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("foolang").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "charset = \"iso-8859-1\"\ntab_stop = 4\n").unwrap();

        let config = Config::load_with_file(Some(file.path())).unwrap();
        assert_eq!(config.charset.as_deref(), Some("iso-8859-1"));
        assert_eq!(config.tab_stop, Some(4));
        assert!(config.output.is_none());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "charsets = \"utf-8\"\n").unwrap();

        assert!(Config::load_with_file(Some(file.path())).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Config::load_with_file(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }
}
