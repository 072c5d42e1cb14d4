//! Reading and writing `config.toml`
//!
//! Writes go through a temporary file in the same directory followed by an
//! atomic rename. The file being replaced is first copied to
//! `config.toml.backup`.

use crate::{Config, ConfigError, ConfigResult, CONFIG_VERSION};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const DEFAULT_HEADER: &str = "\
# castcheck configuration
#
# [app]        log_level: error | warn | info | debug | trace (RUST_LOG wins)
# [validator]  extra_itunes_namespaces: extra URIs accepted as the iTunes namespace
#              parallel_episodes: evaluate episodes on all cores
# [report]     format: text | json, color, show_episodes, fail_on_warnings

";

/// One TOML config file on disk
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the copy kept from the previous write
    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension("toml.backup")
    }

    /// Reads and parses the file
    ///
    /// A missing file yields [`Config::default`]. A blank or unparseable file
    /// is an error. Values that fail validation are logged and kept.
    pub fn read(&self) -> ConfigResult<Config> {
        if !self.path.exists() {
            log::debug!("No config at {}; using defaults", self.path.display());
            return Ok(Config::default());
        }

        let text = fs::read_to_string(&self.path).map_err(|source| ConfigError::ReadError {
            path: self.path.clone(),
            source,
        })?;

        if text.trim().is_empty() {
            return Err(ConfigError::EmptyFile {
                path: self.path.clone(),
            });
        }

        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::ParseError {
            path: self.path.clone(),
            source,
        })?;

        if config.version > CONFIG_VERSION {
            log::warn!(
                "{} declares config version {}; this build understands up to {}",
                self.path.display(),
                config.version,
                CONFIG_VERSION
            );
        }

        if let Err(problems) = config.validate() {
            for problem in &problems {
                log::warn!("{}: {}", self.path.display(), problem);
            }
        }

        Ok(config)
    }

    /// Validates `config` and replaces the file with it
    pub fn write(&self, config: &Config) -> ConfigResult<()> {
        let body = toml::to_string_pretty(config)?;
        self.replace(config, &body)?;
        log::info!("Wrote {}", self.path.display());
        Ok(())
    }

    /// Writes the default config preceded by a comment block describing it
    pub fn write_commented_default(&self) -> ConfigResult<()> {
        let config = Config::default();
        let body = toml::to_string_pretty(&config)?;
        self.replace(&config, &format!("{}{}", DEFAULT_HEADER, body))?;
        log::info!("Wrote default config to {}", self.path.display());
        Ok(())
    }

    fn replace(&self, config: &Config, text: &str) -> ConfigResult<()> {
        config.validate().map_err(ConfigError::ValidationError)?;

        let dir = self
            .path
            .parent()
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: format!("{} has no parent directory", self.path.display()),
            })?;

        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| ConfigError::DirectoryCreationError {
                path: dir.to_path_buf(),
                source,
            })?;
            log::info!("Created {}", dir.display());
        }

        if self.path.exists() {
            let backup = self.backup_path();
            fs::copy(&self.path, &backup).map_err(|source| ConfigError::BackupError { source })?;
            log::debug!("Previous config kept at {}", backup.display());
        }

        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(text.as_bytes())?;
        staged.flush()?;
        staged
            .persist(&self.path)
            .map_err(|e| ConfigError::WriteError {
                path: self.path.clone(),
                source: e.error,
            })?;

        Ok(())
    }
}
