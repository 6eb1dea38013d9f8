//! User configuration loaded from a TOML file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const APP_DIR: &str = "scicalc";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// How long an error decoration stays visible, in milliseconds.
    pub error_flash_ms: u64,
    /// How long a success decoration stays visible, in milliseconds.
    pub success_flash_ms: u64,
    /// Show `[M]` while memory holds a value.
    pub show_memory_indicator: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            error_flash_ms: 1000,
            success_flash_ms: 500,
            show_memory_indicator: true,
        }
    }
}

impl Config {
    pub fn error_flash(&self) -> Duration {
        Duration::from_millis(self.error_flash_ms)
    }

    pub fn success_flash(&self) -> Duration {
        Duration::from_millis(self.success_flash_ms)
    }

    /// Default location: `$XDG_CONFIG_HOME/scicalc/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from an explicit path, or from the default location.
    ///
    /// A missing default file gives the defaults; a missing explicit file
    /// is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse("error_flash_ms = 250\n").unwrap();
        assert_eq!(config.error_flash(), Duration::from_millis(250));
        assert_eq!(config.success_flash(), Duration::from_millis(500));
        assert!(config.show_memory_indicator);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::parse("error_flash_ms = \"soon\"").is_err());
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/scicalc.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
