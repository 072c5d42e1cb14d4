//! castcheck configuration
//!
//! Settings live in a single `config.toml` in the platform config directory.
//! Each section implements [`ConfigSection`]; a missing file or a missing
//! section simply means defaults.
//!
//! # Example
//!
//! ```rust,no_run
//! use castcheck_config::{Config, ConfigManager};
//!
//! let manager = ConfigManager::new().expect("Failed to locate config directory");
//! let config: Config = manager.load_or_default();
//!
//! println!("Report format: {}", config.report.format);
//! ```

mod error;
mod manager;
mod persistence;
mod validation;

// Config sections
pub mod app_config;
pub mod report_config;
pub mod validator_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::ConfigManager;
pub use validation::{ConfigSection, Validator};

pub use app_config::{AppConfig, LogLevel};
pub use report_config::{ReportConfig, ReportFormat};
pub use validator_config::ValidatorConfig;

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Contents of `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    pub app: AppConfig,

    /// Feed judging options
    pub validator: ValidatorConfig,

    /// Report output options
    pub report: ReportConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates every section, returning all errors found
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = [
            self.app.validate(),
            self.validator.validate(),
            self.report.validate(),
        ]
        .into_iter()
        .filter_map(Result::err)
        .flatten()
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Overlays `other` section by section
    pub fn merge(&mut self, other: Config) {
        self.app.merge(other.app);
        self.validator.merge(other.validator);
        self.report.merge(other.report);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            validator: ValidatorConfig::default(),
            report: ReportConfig::default(),
        }
    }
}
