//! Configuration loading logic

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::schema::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration with fallback (from the current working directory)
    ///
    /// Load priority:
    /// 1. Local config (.resolve-pr.toml in current directory)
    /// 2. Global config (~/.config/resolve-pr/config.toml)
    /// 3. Default config
    ///
    /// Local config replaces global config as a whole; settings are not merged
    /// field by field.
    ///
    /// # Errors
    /// Returns an error if configuration files exist but cannot be read or parsed
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::local_config_path(), Self::global_config_path().as_deref())
    }

    /// Load configuration from explicit local and global paths
    ///
    /// # Errors
    /// Returns an error if configuration files exist but cannot be read or parsed
    pub fn load_from(local: &Path, global: Option<&Path>) -> Result<Self> {
        if local.exists() {
            tracing::debug!(path = %local.display(), "using local config");
            return Self::from_file(local);
        }

        if let Some(global) = global {
            if global.exists() {
                tracing::debug!(path = %global.display(), "using global config");
                return Self::from_file(global);
            }
        }

        Ok(Self::default())
    }

    /// Get the local config path
    /// Returns the path to the local config file in the current directory
    #[must_use]
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(".resolve-pr.toml")
    }

    /// Get the global config path
    /// Respects `XDG_CONFIG_HOME` environment variable on all platforms.
    /// Fallback: `$HOME/.config/resolve-pr/config.toml`
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;

        Some(config_home.join("resolve-pr").join("config.toml"))
    }
}
