//! Configuration management for orgbrand

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::branding::DEFAULT_ICON;
use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory holding the store database (defaults to the user cache dir)
    pub store_dir: Option<PathBuf>,

    /// Icon used when no cached logo is available
    #[serde(default = "default_icon")]
    pub default_icon: String,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Preferences {
    /// Default output format
    pub format: Option<String>,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".orgbrand").join("config.yaml"))
    }

    /// Load configuration from an explicit path, or the default location.
    ///
    /// A missing file at the default location yields the default config; a
    /// missing file at an explicit path is an error.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(Path::new(path)),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    log::debug!("No config at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.default_icon.trim().is_empty() {
            return Err(ConfigError::Invalid("default_icon must not be empty".to_string()).into());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: None,
            default_icon: default_icon(),
            preferences: Preferences::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.store_dir.is_none());
        assert_eq!(config.default_icon, "/favicon.ico");
        assert!(config.preferences.format.is_none());
    }

    #[test]
    fn test_load_full_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "store_dir: /var/tmp/orgbrand\ndefault_icon: /brand/icon.svg\npreferences:\n  format: json\n",
        )
        .unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.store_dir, Some(PathBuf::from("/var/tmp/orgbrand")));
        assert_eq!(loaded.default_icon, "/brand/icon.svg");
        assert_eq!(loaded.preferences.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "store_dir: /tmp/brand\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_icon, "/favicon.ico");
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yaml");

        match Config::load_at(path.to_str()) {
            Err(Error::Config(ConfigError::NotFound(_))) => (),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_default_icon_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "default_icon: \"  \"\n").unwrap();

        match Config::load_from(&path) {
            Err(Error::Config(ConfigError::Invalid(_))) => (),
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }
}
