//! Podcast RSS feed validation
//!
//! A run passes the feed through a fixed series of structural gates and,
//! when they all hold, through the channel and episode rules. The outcome is
//! a [`FeedReport`]: errors decide pass/fail, warnings and recommendations
//! never do.
//!
//! ```rust
//! use castcheck_validator::{validate_str, ChannelWarning, ErrorCode};
//!
//! let report = validate_str(r#"<rss version="2.0"
//!     xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
//!   <channel><title>My Show</title></channel>
//! </rss>"#);
//! assert!(report.passes());
//! assert!(report.has_warning(ChannelWarning::NoItems));
//!
//! let report = validate_str("<feed/>");
//! assert!(!report.passes());
//! assert!(report.has_error(ErrorCode::TagNotRss));
//! ```

pub mod channel;
pub mod episode;
pub mod gates;
mod options;
mod pipeline;

pub use options::ValidationOptions;
pub use pipeline::{validate_file, validate_str, FeedValidator};

// Re-export the result types so most callers need only this crate
pub use castcheck_categories::{CategoryTaxonomy, ItunesCategories};
pub use castcheck_core::{
    ChannelRecommendation, ChannelWarning, Check, EpisodeLedger, EpisodeRecommendation,
    EpisodeWarning, ErrorCode, FeedFlag, FeedReport, FindingCode, Outcome, ReportSummary,
    Severity,
};
