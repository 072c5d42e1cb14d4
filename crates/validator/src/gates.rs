// crates/validator/src/gates.rs
//! Structural gates
//!
//! The gates run in a fixed order and the first failing gate ends the run:
//! existence, blank content, well-formedness, RSS root and version, iTunes
//! namespace, channel presence. Each gate resolves its own flag on the
//! report, so a failed report tells the caller exactly how far the feed got.

use crate::options::ValidationOptions;
use castcheck_core::{ErrorCode, FeedFlag, FeedReport};
use castcheck_feed_parser::{Channel, Document, FeedError, FeedParser};
use std::borrow::Cow;
use std::path::Path;

/// The only RSS version a podcast feed may declare
pub const RSS_VERSION: &str = "2.0";

/// Where the feed text comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    Path(&'a Path),
    Content(&'a str),
    /// Nothing was loaded; judged as blank content
    Missing,
}

/// Runs every gate, returning the channel when all of them pass
///
/// `None` means a gate failed; the report is already failed and carries the
/// reason.
pub fn check(
    source: Source<'_>,
    options: &ValidationOptions,
    report: &mut FeedReport,
) -> Option<Channel> {
    let content = read(source, report)?;

    if is_blank(&content) {
        log::debug!("Feed content is blank");
        report.reject(FeedFlag::Content);
        return None;
    }
    report.confirm(FeedFlag::Content);

    let document = parse(&content, report)?;

    if !check_rss(&document, report) {
        return None;
    }

    if !options.accepts_itunes_namespace(&document) {
        log::debug!("No iTunes namespace declared");
        report.add_error(ErrorCode::MissingItunesNs);
        report.reject(FeedFlag::ItunesNamespace);
        return None;
    }
    report.confirm(FeedFlag::ItunesNamespace);

    match document.channel {
        Some(channel) => {
            report.confirm(FeedFlag::Channel);
            Some(channel)
        }
        None => {
            log::debug!("Root element has no <channel>");
            report.reject(FeedFlag::Channel);
            None
        }
    }
}

/// Returns true if nothing but whitespace (and a byte order mark) remains
pub fn is_blank(content: &str) -> bool {
    content.trim_start_matches('\u{feff}').trim().is_empty()
}

fn read<'a>(source: Source<'a>, report: &mut FeedReport) -> Option<Cow<'a, str>> {
    match source {
        Source::Path(path) => match FeedParser::read_source(path) {
            Ok(content) => {
                report.confirm(FeedFlag::FileExists);
                Some(Cow::Owned(content))
            }
            Err(FeedError::NotFound { path }) => {
                log::debug!("Feed file not found: {}", path.display());
                report.reject(FeedFlag::FileExists);
                None
            }
            Err(FeedError::Io { path, source }) => {
                log::debug!("Feed file unreadable: {}: {}", path.display(), source);
                report.reject(FeedFlag::FileExists);
                None
            }
            // The bytes are there but cannot be XML
            Err(FeedError::InvalidMarkup(reason)) => {
                log::debug!("Feed file rejected: {}", reason);
                report
                    .confirm(FeedFlag::FileExists)
                    .confirm(FeedFlag::Content)
                    .reject(FeedFlag::WellFormed);
                None
            }
        },
        Source::Content(content) => Some(Cow::Borrowed(content)),
        Source::Missing => Some(Cow::Borrowed("")),
    }
}

fn parse(content: &str, report: &mut FeedReport) -> Option<Document> {
    match FeedParser::parse(content) {
        Ok(document) => {
            report.confirm(FeedFlag::WellFormed);
            Some(document)
        }
        Err(FeedError::InvalidMarkup(reason)) => {
            log::debug!("Feed is not well-formed: {}", reason);
            report.reject(FeedFlag::WellFormed);
            None
        }
        Err(err @ (FeedError::NotFound { .. } | FeedError::Io { .. })) => {
            log::debug!("Unexpected I/O failure while parsing: {}", err);
            report.reject(FeedFlag::WellFormed);
            None
        }
    }
}

/// Root must be `<rss>` (under any prefix) and carry exactly `version="2.0"`; both failures are recorded
fn check_rss(document: &Document, report: &mut FeedReport) -> bool {
    let mut is_rss = true;

    if document.root != "rss" {
        log::debug!("Root element is <{}>, not <rss>", document.root);
        report.add_error(ErrorCode::TagNotRss);
        is_rss = false;
    }

    match document.version.as_deref() {
        None => {
            report.add_error(ErrorCode::MissingRssVersion);
            is_rss = false;
        }
        Some(version) if version != RSS_VERSION => {
            log::debug!("Unsupported RSS version '{}'", version);
            report.add_error(ErrorCode::WrongRssVersion);
            is_rss = false;
        }
        Some(_) => {}
    }

    if is_rss {
        report.confirm(FeedFlag::Rss);
    } else {
        report.reject(FeedFlag::Rss);
    }
    is_rss
}
