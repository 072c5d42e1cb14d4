//! Entry point for locating and maintaining the config file

use crate::persistence::ConfigFile;
use crate::{Config, ConfigError, ConfigResult};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

/// Owns the location of `config.toml` and every operation on it
pub struct ConfigManager {
    config_dir: PathBuf,
    file: ConfigFile,
}

impl ConfigManager {
    /// Uses the platform config directory
    ///
    /// - Linux: `~/.config/castcheck/`
    /// - macOS: `~/Library/Application Support/castcheck/`
    /// - Windows: `%APPDATA%\castcheck\config\`
    pub fn new() -> ConfigResult<Self> {
        let dirs = ProjectDirs::from("", "", "castcheck").ok_or_else(|| {
            ConfigError::PathResolutionError {
                reason: "no home directory for the current user".to_string(),
            }
        })?;
        Ok(Self::with_directory(dirs.config_dir()))
    }

    /// Uses `config_dir` instead of the platform directory
    pub fn with_directory(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let file = ConfigFile::new(config_dir.join(CONFIG_FILE));
        Self { config_dir, file }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    /// Reads the config file; a missing file yields defaults
    pub fn load(&self) -> ConfigResult<Config> {
        self.file.read()
    }

    /// Like [`load`](Self::load), but any failure is logged and replaced by defaults
    pub fn load_or_default(&self) -> Config {
        self.load().unwrap_or_else(|e| {
            log::warn!("{}; falling back to default config", e);
            Config::default()
        })
    }

    /// Validates `config` and atomically writes it
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.file.write(config)
    }

    /// Writes a commented default config unless one is already present
    ///
    /// Returns whether a file was written.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.file.path().exists() {
            log::info!("Keeping existing {}", self.file.path().display());
            return Ok(false);
        }

        self.file.write_commented_default()?;
        Ok(true)
    }

    /// Replaces the file with the defaults
    pub fn reset(&self) -> ConfigResult<()> {
        self.save(&Config::default())
    }

    /// Lists every validation problem in the current file
    ///
    /// An unreadable file is an error; an invalid but parseable one is not.
    pub fn validate(&self) -> ConfigResult<Vec<String>> {
        let config = self.load()?;
        Ok(config
            .validate()
            .err()
            .unwrap_or_default()
            .iter()
            .map(ToString::to_string)
            .collect())
    }
}
