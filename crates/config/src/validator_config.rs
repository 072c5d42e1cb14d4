//! Validator configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// How feeds are judged
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ValidatorConfig {
    /// URIs accepted as the iTunes namespace besides the standard ones
    pub extra_itunes_namespaces: Vec<String>,

    /// Evaluate episodes in parallel
    pub parallel_episodes: bool,
}

impl ConfigSection for ValidatorConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let field = "validator.extra_itunes_namespaces";

        let mut results: Vec<_> = self
            .extra_itunes_namespaces
            .iter()
            .map(|uri| Validator::http_uri(uri, field))
            .collect();
        results.push(Validator::unique(&self.extra_itunes_namespaces, field));

        Validator::collect_errors(results)
    }

    fn merge(&mut self, other: Self) {
        self.extra_itunes_namespaces = other.extra_itunes_namespaces;
        self.parallel_episodes = other.parallel_episodes;
    }

    fn section_name(&self) -> &'static str {
        "validator"
    }
}
