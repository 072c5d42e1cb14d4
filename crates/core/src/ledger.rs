//! Finding ledger
//!
//! A [`Ledger`] collects the findings recorded against one scope (the channel
//! or a single episode) together with an explicit pass/fail outcome. Codes are
//! stored in sets, so recording the same code twice has no effect.

use crate::codes::{
    ChannelRecommendation, ChannelWarning, EpisodeRecommendation, EpisodeWarning, ErrorCode,
    FindingCode,
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Terminal state of a ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Evaluation has not finished yet
    #[default]
    Pending,
    /// Evaluation finished and the scope is usable
    Passed,
    /// A structural gate failed
    Failed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Findings for one scope, generic over its warning and recommendation namespaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ledger<W: FindingCode, R: FindingCode> {
    outcome: Outcome,
    errors: BTreeSet<ErrorCode>,
    warnings: BTreeSet<W>,
    recommendations: BTreeSet<R>,
}

/// Ledger for channel-level findings
pub type ChannelLedger = Ledger<ChannelWarning, ChannelRecommendation>;

/// Ledger for the findings of a single episode
pub type EpisodeLedger = Ledger<EpisodeWarning, EpisodeRecommendation>;

impl<W: FindingCode, R: FindingCode> Ledger<W, R> {
    /// Creates an empty ledger with a pending outcome
    pub fn new() -> Self {
        Self {
            outcome: Outcome::Pending,
            errors: BTreeSet::new(),
            warnings: BTreeSet::new(),
            recommendations: BTreeSet::new(),
        }
    }

    /// Records an error; returns false if it was already present
    pub fn add_error(&mut self, code: ErrorCode) -> bool {
        self.errors.insert(code)
    }

    /// Records a warning; returns false if it was already present
    pub fn add_warning(&mut self, code: W) -> bool {
        self.warnings.insert(code)
    }

    /// Records a recommendation; returns false if it was already present
    pub fn add_recommendation(&mut self, code: R) -> bool {
        self.recommendations.insert(code)
    }

    /// Marks the ledger as passed
    pub fn pass(&mut self) -> &mut Self {
        self.outcome = Outcome::Passed;
        self
    }

    /// Marks the ledger as failed
    pub fn fail(&mut self) -> &mut Self {
        self.outcome = Outcome::Failed;
        self
    }

    /// Returns the current outcome
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns true once the ledger has been marked passed
    pub fn passes(&self) -> bool {
        self.outcome == Outcome::Passed
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn has_recommendations(&self) -> bool {
        !self.recommendations.is_empty()
    }

    pub fn has_error(&self, code: ErrorCode) -> bool {
        self.errors.contains(&code)
    }

    pub fn has_warning(&self, code: W) -> bool {
        self.warnings.contains(&code)
    }

    pub fn has_recommendation(&self, code: R) -> bool {
        self.recommendations.contains(&code)
    }

    pub fn errors(&self) -> &BTreeSet<ErrorCode> {
        &self.errors
    }

    pub fn warnings(&self) -> &BTreeSet<W> {
        &self.warnings
    }

    pub fn recommendations(&self) -> &BTreeSet<R> {
        &self.recommendations
    }

    /// Total number of distinct findings across all three tiers
    pub fn finding_count(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.recommendations.len()
    }

    /// Returns true if nothing at all was recorded
    pub fn is_clean(&self) -> bool {
        self.finding_count() == 0
    }
}

impl<W: FindingCode, R: FindingCode> Default for Ledger<W, R> {
    fn default() -> Self {
        Self::new()
    }
}
