//! Configuration management for userdb.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name under the platform config directory.
const APP_DIR_NAME: &str = "userdb";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "USERDB_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `USERDB_`, nested keys split on `__`)
/// 2. TOML config file at `~/.config/userdb/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backing file used when `--file-name` is not given.
    pub file_name: Option<PathBuf>,
    /// Permission bits for a newly created backing file (Unix only).
    pub create_mode: u32,
    /// Sync the backing file to disk after every write.
    pub sync_writes: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            file_name: None,
            create_mode: 0o644,
            sync_writes: false,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// A missing config file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        Self::from_figment(Self::figment(config_file))
    }

    /// Build the layered figment for `config_file`.
    fn figment(config_file: PathBuf) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let mode = self.storage.create_mode;

        if mode > 0o777 {
            return Err(Error::ConfigValidation {
                message: format!("create_mode ({mode:#o}) must not exceed 0o777"),
            });
        }

        if mode & 0o600 != 0o600 {
            return Err(Error::ConfigValidation {
                message: format!("create_mode ({mode:#o}) must grant owner read and write"),
            });
        }

        if let Some(path) = &self.storage.file_name {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "file_name must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}
