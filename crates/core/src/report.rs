//! Feed-level validation report
//!
//! A [`FeedReport`] wraps the channel [`Ledger`](crate::ledger::Ledger) with
//! the structural state of the feed (was it found, is it XML, is it RSS...)
//! and the ledgers of every episode, in document order.

use crate::codes::{ChannelRecommendation, ChannelWarning, ErrorCode};
use crate::ledger::{ChannelLedger, EpisodeLedger, Outcome};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Lifecycle of a single structural check
///
/// A check starts `Pending` and is resolved at most once. Queries treat a
/// pending check optimistically: only a confirmed failure reads as false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Check {
    #[default]
    Pending,
    Passed,
    Failed,
}

impl Check {
    /// Returns false only when the check was confirmed to fail
    pub fn holds(self) -> bool {
        self != Check::Failed
    }

    /// Returns true once the check has been evaluated
    pub fn is_resolved(self) -> bool {
        self != Check::Pending
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Structural properties tracked on a feed report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedFlag {
    /// The file named by the caller exists and is readable
    FileExists,
    /// The input is not blank
    Content,
    /// The input parses as XML
    WellFormed,
    /// The root element is `<rss version="2.0">`
    Rss,
    /// The iTunes podcast namespace is declared
    ItunesNamespace,
    /// The root element contains a `<channel>`
    Channel,
}

impl FeedFlag {
    pub const ALL: [FeedFlag; 6] = [
        FeedFlag::FileExists,
        FeedFlag::Content,
        FeedFlag::WellFormed,
        FeedFlag::Rss,
        FeedFlag::ItunesNamespace,
        FeedFlag::Channel,
    ];

    /// Short name used in logs and rendered reports
    pub fn name(self) -> &'static str {
        match self {
            Self::FileExists => "file_exists",
            Self::Content => "has_content",
            Self::WellFormed => "well_formed",
            Self::Rss => "is_rss",
            Self::ItunesNamespace => "itunes_namespace",
            Self::Channel => "has_channel",
        }
    }
}

/// State of every structural check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FeedChecks {
    pub file_exists: Check,
    pub has_content: Check,
    pub well_formed: Check,
    pub is_rss: Check,
    pub itunes_namespace: Check,
    pub has_channel: Check,
}

impl FeedChecks {
    /// Returns the state of one check
    pub fn get(&self, flag: FeedFlag) -> Check {
        match flag {
            FeedFlag::FileExists => self.file_exists,
            FeedFlag::Content => self.has_content,
            FeedFlag::WellFormed => self.well_formed,
            FeedFlag::Rss => self.is_rss,
            FeedFlag::ItunesNamespace => self.itunes_namespace,
            FeedFlag::Channel => self.has_channel,
        }
    }

    fn slot(&mut self, flag: FeedFlag) -> &mut Check {
        match flag {
            FeedFlag::FileExists => &mut self.file_exists,
            FeedFlag::Content => &mut self.has_content,
            FeedFlag::WellFormed => &mut self.well_formed,
            FeedFlag::Rss => &mut self.is_rss,
            FeedFlag::ItunesNamespace => &mut self.itunes_namespace,
            FeedFlag::Channel => &mut self.has_channel,
        }
    }
}

/// Finding counts across a whole report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReportSummary {
    pub errors: usize,
    pub warnings: usize,
    pub recommendations: usize,
    pub episodes: usize,
    pub episodes_with_findings: usize,
}

impl ReportSummary {
    /// Total number of findings of any tier
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.recommendations
    }
}

/// Channel-level result of validating one feed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FeedReport {
    #[serde(flatten)]
    ledger: ChannelLedger,
    checks: FeedChecks,
    item_count: usize,
    episodes: Vec<EpisodeLedger>,
}

impl FeedReport {
    /// Creates an empty report with every check pending
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a structural check held
    pub fn confirm(&mut self, flag: FeedFlag) -> &mut Self {
        self.resolve(flag, Check::Passed);
        self
    }

    /// Records that a structural check failed and fails the report
    pub fn reject(&mut self, flag: FeedFlag) -> &mut Self {
        self.resolve(flag, Check::Failed);
        self.ledger.fail();
        self
    }

    fn resolve(&mut self, flag: FeedFlag, state: Check) {
        let slot = self.checks.slot(flag);
        debug_assert!(
            !slot.is_resolved(),
            "check {} resolved twice",
            flag.name()
        );
        *slot = state;
    }

    pub fn add_error(&mut self, code: ErrorCode) -> bool {
        self.ledger.add_error(code)
    }

    pub fn add_warning(&mut self, code: ChannelWarning) -> bool {
        self.ledger.add_warning(code)
    }

    pub fn add_recommendation(&mut self, code: ChannelRecommendation) -> bool {
        self.ledger.add_recommendation(code)
    }

    /// Records the number of episodes; an empty feed gets `no_items`
    pub fn set_item_count(&mut self, count: usize) -> &mut Self {
        self.item_count = count;
        if count == 0 {
            self.ledger.add_warning(ChannelWarning::NoItems);
        }
        self
    }

    /// Attaches the episode ledgers, in document order
    pub fn attach_episodes(&mut self, episodes: Vec<EpisodeLedger>) -> &mut Self {
        debug_assert!(self.episodes.is_empty(), "episodes attached twice");
        self.episodes = episodes;
        self
    }

    pub fn pass(&mut self) -> &mut Self {
        self.ledger.pass();
        self
    }

    pub fn fail(&mut self) -> &mut Self {
        self.ledger.fail();
        self
    }

    // ===== Queries =====

    pub fn passes(&self) -> bool {
        self.ledger.passes()
    }

    pub fn outcome(&self) -> Outcome {
        self.ledger.outcome()
    }

    /// False only when the feed file was looked for and not found
    pub fn found(&self) -> bool {
        self.checks.file_exists.holds()
    }

    pub fn has_content(&self) -> bool {
        self.checks.has_content.holds()
    }

    pub fn is_well_formed(&self) -> bool {
        self.checks.well_formed.holds()
    }

    pub fn is_rss(&self) -> bool {
        self.checks.is_rss.holds()
    }

    pub fn has_itunes_namespace(&self) -> bool {
        self.checks.itunes_namespace.holds()
    }

    pub fn has_channel(&self) -> bool {
        self.checks.has_channel.holds()
    }

    /// Returns the raw lifecycle state of one check
    pub fn check(&self, flag: FeedFlag) -> Check {
        self.checks.get(flag)
    }

    pub fn checks(&self) -> &FeedChecks {
        &self.checks
    }

    pub fn ledger(&self) -> &ChannelLedger {
        &self.ledger
    }

    pub fn has_errors(&self) -> bool {
        self.ledger.has_errors()
    }

    pub fn has_warnings(&self) -> bool {
        self.ledger.has_warnings()
    }

    pub fn has_recommendations(&self) -> bool {
        self.ledger.has_recommendations()
    }

    pub fn has_error(&self, code: ErrorCode) -> bool {
        self.ledger.has_error(code)
    }

    pub fn has_warning(&self, code: ChannelWarning) -> bool {
        self.ledger.has_warning(code)
    }

    pub fn has_recommendation(&self, code: ChannelRecommendation) -> bool {
        self.ledger.has_recommendation(code)
    }

    pub fn errors(&self) -> &BTreeSet<ErrorCode> {
        self.ledger.errors()
    }

    pub fn warnings(&self) -> &BTreeSet<ChannelWarning> {
        self.ledger.warnings()
    }

    pub fn recommendations(&self) -> &BTreeSet<ChannelRecommendation> {
        self.ledger.recommendations()
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Episode ledgers in document order
    pub fn episodes(&self) -> &[EpisodeLedger] {
        &self.episodes
    }

    /// Indices and ledgers of episodes that recorded anything
    pub fn episodes_with_findings(&self) -> impl Iterator<Item = (usize, &EpisodeLedger)> {
        self.episodes
            .iter()
            .enumerate()
            .filter(|(_, episode)| !episode.is_clean())
    }

    /// Counts findings across the channel and every episode
    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary {
            errors: self.ledger.errors().len(),
            warnings: self.ledger.warnings().len(),
            recommendations: self.ledger.recommendations().len(),
            episodes: self.episodes.len(),
            episodes_with_findings: 0,
        };

        for episode in &self.episodes {
            summary.errors += episode.errors().len();
            summary.warnings += episode.warnings().len();
            summary.recommendations += episode.recommendations().len();
            if !episode.is_clean() {
                summary.episodes_with_findings += 1;
            }
        }

        summary
    }
}
