use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use colonnade_engine::LayoutOptions;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_VAR: &str = "COLONNADE_CONFIG";

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "colonnade.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Host configuration for the column transform engine.
///
/// ```toml
/// [layout]
/// nested_columns = true
/// column = "column"
/// column_block = "columnBlock"
/// ```
///
/// Every field is optional; omitted fields fall back to the engine's
/// defaults.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutOptions,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    /// Load from `$COLONNADE_CONFIG` if set, else `colonnade.toml` in the
    /// working directory. Missing files are not an error.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from_path(dir.path().join("absent.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colonnade.toml");
        std::fs::write(
            &path,
            "[layout]\nnested_columns = true\ncolumn = \"cell\"\ncolumn_block = \"grid\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap().unwrap();

        assert!(config.layout.nested_columns);
        assert_eq!(config.layout.column.as_str(), "cell");
        assert_eq!(config.layout.column_block.as_str(), "grid");
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colonnade.toml");
        std::fs::write(&path, "[layout]\nnested_columns = true\n").unwrap();

        let config = Config::load_from_path(&path).unwrap().unwrap();

        assert!(config.layout.nested_columns);
        assert_eq!(config.layout.column.as_str(), "column");
        assert_eq!(config.layout.column_block.as_str(), "columnBlock");
    }

    #[test]
    fn test_load_empty_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colonnade.toml");
        std::fs::write(&path, "").unwrap();

        let config = Config::load_from_path(&path).unwrap().unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_error_is_typed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colonnade.toml");
        std::fs::write(&path, "layout = \"not a table\"").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/colonnade.toml");
        let config = Config {
            layout: LayoutOptions::new(true),
        };

        config.save_to_path(&path).unwrap();
        let loaded = Config::load_from_path(&path).unwrap().unwrap();

        assert_eq!(loaded, config);
    }
}
