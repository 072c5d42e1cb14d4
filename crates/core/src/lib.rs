//! Core result types for castcheck
//!
//! - `codes`: the finding code namespaces and their stable wire strings
//! - `ledger`: the deduplicating per-scope collection of findings
//! - `report`: the channel-level report with structural checks and episodes

pub mod codes;
pub mod error;
pub mod ledger;
pub mod report;

// Re-export commonly used types
pub use codes::{
    ChannelRecommendation, ChannelWarning, EpisodeRecommendation, EpisodeWarning, ErrorCode,
    FindingCode, Severity,
};
pub use error::{CodeError, CodeResult};
pub use ledger::{ChannelLedger, EpisodeLedger, Ledger, Outcome};
pub use report::{Check, FeedChecks, FeedFlag, FeedReport, ReportSummary};
