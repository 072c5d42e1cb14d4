// crates/validator/src/pipeline.rs
//! Validation entry point

use crate::channel;
use crate::gates::{self, Source};
use crate::options::ValidationOptions;
use castcheck_categories::{CategoryTaxonomy, ItunesCategories};
use castcheck_core::FeedReport;
use std::path::{Path, PathBuf};

/// Validates one podcast feed
///
/// Point the validator at a file with [`load`](Self::load) or hand it the
/// feed text with [`set_content`](Self::set_content), then call
/// [`run`](Self::run). When both are set the file wins.
#[derive(Debug, Clone)]
pub struct FeedValidator<T = ItunesCategories> {
    path: Option<PathBuf>,
    content: Option<String>,
    taxonomy: T,
    options: ValidationOptions,
}

impl FeedValidator<ItunesCategories> {
    /// Creates a validator using the Apple Podcasts category list
    pub fn new() -> Self {
        Self::with_taxonomy(ItunesCategories::new())
    }
}

impl Default for FeedValidator<ItunesCategories> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CategoryTaxonomy> FeedValidator<T> {
    /// Creates a validator checking categories against `taxonomy`
    pub fn with_taxonomy(taxonomy: T) -> Self {
        Self {
            path: None,
            content: None,
            taxonomy,
            options: ValidationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates the file at `path` on the next run
    pub fn load(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.path = Some(path.into());
        self
    }

    /// Validates `content` on the next run, unless a path is loaded
    pub fn set_content(&mut self, content: impl Into<String>) -> &mut Self {
        self.content = Some(content.into());
        self
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn taxonomy(&self) -> &T {
        &self.taxonomy
    }

    fn source(&self) -> Source<'_> {
        match (&self.path, &self.content) {
            (Some(path), _) => Source::Path(path),
            (None, Some(content)) => Source::Content(content),
            (None, None) => Source::Missing,
        }
    }

    /// Validates the loaded feed
    ///
    /// Never fails; every problem is recorded on the returned report. Running
    /// twice without changing the input yields equal reports.
    pub fn run(&self) -> FeedReport {
        let mut report = FeedReport::new();

        if let Some(channel) = gates::check(self.source(), &self.options, &mut report) {
            channel::evaluate(&channel, &self.taxonomy, &self.options, &mut report);
        }

        let summary = report.summary();
        log::info!(
            "Feed {}: {} error(s), {} warning(s), {} recommendation(s) across {} episode(s)",
            report.outcome(),
            summary.errors,
            summary.warnings,
            summary.recommendations,
            summary.episodes
        );

        report
    }
}

/// Validates the feed file at `path` with default settings
pub fn validate_file(path: impl AsRef<Path>) -> FeedReport {
    let mut validator = FeedValidator::new();
    validator.load(path.as_ref());
    validator.run()
}

/// Validates feed text with default settings
pub fn validate_str(content: &str) -> FeedReport {
    let mut validator = FeedValidator::new();
    validator.set_content(content);
    validator.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use castcheck_core::{ChannelWarning, Outcome};

    const FEED: &str = r#"<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
  <channel>
    <title>Show</title>
    <item><title>One</title></item>
    <item><title>Two</title></item>
  </channel>
</rss>"#;

    #[test]
    fn test_new_report_per_run() {
        let mut validator = FeedValidator::new();
        validator.set_content(FEED);

        let first = validator.run();
        let second = validator.run();
        assert_eq!(first, second);
        assert_eq!(first.outcome(), Outcome::Passed);
        assert_eq!(first.item_count(), 2);
    }

    #[test]
    fn test_path_wins_over_content() {
        let mut validator = FeedValidator::new();
        validator
            .set_content(FEED)
            .load("/definitely/not/here/feed.rss");

        let report = validator.run();
        assert!(!report.found());
        assert!(!report.passes());
    }

    #[test]
    fn test_nothing_loaded() {
        let report = FeedValidator::new().run();
        assert!(report.found());
        assert!(!report.has_content());
        assert_eq!(report.outcome(), Outcome::Failed);
    }

    #[test]
    fn test_parallel_option_gives_same_report() {
        let sequential = validate_str(FEED);

        let mut validator =
            FeedValidator::new().with_options(ValidationOptions::new().parallel(true));
        validator.set_content(FEED);
        assert_eq!(validator.run(), sequential);
    }

    #[test]
    fn test_custom_taxonomy_is_used() {
        let feed = FEED.replace(
            "<title>Show</title>",
            r#"<title>Show</title><itunes:category text="Local"/>"#,
        );

        assert!(validate_str(&feed).has_warning(ChannelWarning::InvalidCategory));

        let taxonomy: std::collections::BTreeSet<String> =
            std::iter::once("Local".to_string()).collect();
        let mut validator = FeedValidator::with_taxonomy(taxonomy);
        validator.set_content(feed);
        let report = validator.run();
        assert!(!report.has_warning(ChannelWarning::InvalidCategory));
        assert!(validator.taxonomy().contains("Local"));
    }
}
