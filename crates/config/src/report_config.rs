//! Report output configuration section

use crate::validation::{ConfigSection, ValidationError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Output format for validation reports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 2] = [ReportFormat::Text, ReportFormat::Json];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportFormat::Text => "text",
            ReportFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::with_value("report.format", "must be one of: text, json", s)
            })
    }
}

/// How reports are printed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,

    /// Style text output when the terminal supports it
    pub color: bool,

    /// List findings for each episode, not just the totals
    pub show_episodes: bool,

    /// Treat channel or episode warnings as a failed run
    pub fail_on_warnings: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            color: true,
            show_episodes: true,
            fail_on_warnings: false,
        }
    }
}

impl ConfigSection for ReportConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Ok(())
    }

    fn merge(&mut self, other: Self) {
        self.format = other.format;
        self.color = other.color;
        self.show_episodes = other.show_episodes;
        self.fail_on_warnings = other.fail_on_warnings;
    }

    fn section_name(&self) -> &'static str {
        "report"
    }
}
