// crates/validator/tests/validator_tests.rs
//! End-to-end validation of fixture feeds

use castcheck_validator::{
    validate_file, validate_str, ChannelRecommendation, ChannelWarning, EpisodeRecommendation,
    EpisodeWarning, ErrorCode, FeedReport, FeedValidator, FindingCode, ValidationOptions,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run_fixture(name: &str) -> FeedReport {
    validate_file(fixture(name))
}

// ===== Structural gates =====

#[test]
fn test_fails_if_file_not_found() {
    let report = run_fixture("not-exist.rss");
    assert!(!report.passes());
    assert!(!report.found());
    assert!(!report.has_errors());
}

#[test]
fn test_fails_if_file_is_blank() {
    for name in ["blank.rss", "whitespace.rss"] {
        let report = run_fixture(name);
        assert!(!report.passes(), "{} should fail", name);
        assert!(report.found());
        assert!(!report.has_content());
    }
}

#[test]
fn test_fails_if_file_is_not_xml() {
    let report = run_fixture("not-xml.rss");
    assert!(report.found());
    assert!(report.has_content());
    assert!(!report.is_well_formed());
    assert!(!report.passes());
}

#[test]
fn test_fails_if_string_is_not_xml() {
    let report = validate_str("i am not xml");
    assert!(report.found());
    assert!(!report.passes());
    assert!(!report.is_well_formed());
}

#[test]
fn test_fails_if_file_is_not_valid_xml() {
    let report = run_fixture("invalid-xml.rss");
    assert!(report.found());
    assert!(!report.passes());
    assert!(!report.is_well_formed());
}

#[test]
fn test_fails_if_file_is_not_utf8() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("latin1.rss");
    fs::write(&path, b"<rss version=\"2.0\"><channel><title>Caf\xe9</title></channel></rss>")
        .expect("Failed to write fixture");

    let report = validate_file(&path);
    assert!(report.found());
    assert!(report.has_content());
    assert!(!report.is_well_formed());
    assert!(!report.passes());
}

#[test]
fn test_accepts_declared_encodings() {
    // ISO-8859-1 by declaration, UTF-16 by byte order mark
    for name in ["latin1.rss", "utf16.rss"] {
        let report = run_fixture(name);
        assert!(report.is_well_formed(), "{} should be well-formed", name);
        assert!(report.passes(), "{} should pass", name);
        assert!(!report.has_warnings());
        assert!(!report.has_recommendations());
        assert_eq!(report.item_count(), 2);
    }
}

#[test]
fn test_fails_if_file_is_not_rss() {
    let report = run_fixture("not-rss.xml");
    assert!(report.found());
    assert!(!report.passes());
    assert!(!report.is_rss());
    assert!(report.has_errors());
    assert!(report.has_error(ErrorCode::TagNotRss));
    assert!(report.has_error(ErrorCode::MissingRssVersion));
    assert_eq!(report.errors().len(), 2);
}

#[test]
fn test_fails_if_rss_version_missing() {
    let report = run_fixture("missing-rss-version.rss");
    assert!(report.found());
    assert!(!report.passes());
    assert!(!report.is_rss());
    assert!(report.has_error(ErrorCode::MissingRssVersion));
    assert!(!report.has_error(ErrorCode::TagNotRss));
}

#[test]
fn test_fails_if_rss_version_wrong() {
    let report = run_fixture("wrong-rss-version.rss");
    assert!(report.found());
    assert!(!report.passes());
    assert!(!report.is_rss());
    assert!(report.has_error(ErrorCode::WrongRssVersion));
    assert_eq!(report.errors().len(), 1);
}

#[test]
fn test_fails_if_itunes_namespace_missing() {
    let report = run_fixture("missing-itunes-namespace.rss");
    assert!(report.found());
    assert!(report.is_rss());
    assert!(!report.passes());
    assert!(!report.has_itunes_namespace());
    assert!(report.has_error(ErrorCode::MissingItunesNs));
}

#[test]
fn test_accepts_https_itunes_namespace() {
    let report = run_fixture("https-itunes-namespace.rss");
    assert!(report.passes());
    assert!(report.has_itunes_namespace());
}

#[test]
fn test_extra_itunes_namespace_from_options() {
    let content = fs::read_to_string(fixture("full.rss"))
        .expect("Failed to read fixture")
        .replace(
            "http://www.itunes.com/dtds/podcast-1.0.dtd",
            "http://www.itunes.com/DTDs/Podcast-1.0.dtd",
        );

    let mut validator = FeedValidator::new();
    validator.set_content(content.as_str());
    assert!(validator.run().has_error(ErrorCode::MissingItunesNs));

    let mut validator = FeedValidator::new().with_options(
        ValidationOptions::new().with_itunes_namespace("http://www.itunes.com/DTDs/Podcast-1.0.dtd"),
    );
    validator.set_content(content);
    assert!(validator.run().passes());
}

#[test]
fn test_fails_if_file_has_no_channel() {
    let report = run_fixture("no-channel.rss");
    assert!(!report.passes());
    assert!(report.found());
    assert!(report.is_rss());
    assert!(!report.has_channel());
    assert!(report.episodes().is_empty());
}

// ===== Channel rules =====

#[test]
fn test_warns_if_itunes_categories_are_invalid() {
    let report = run_fixture("invalid-itunes-categories.rss");
    assert!(report.passes());
    assert!(report.has_warnings());
    assert!(report.has_warning(ChannelWarning::InvalidCategory));
    assert_eq!(report.warnings().len(), 1);
}

#[test]
fn test_warns_if_no_items() {
    let report = run_fixture("no-items.rss");
    assert!(report.passes());
    assert!(report.has_warning(ChannelWarning::NoItems));
    assert_eq!(report.item_count(), 0);
    assert!(report.episodes().is_empty());
}

#[test]
fn test_channel_warnings_for_missing_required_fields() {
    let cases = [
        ("no-title.rss", ChannelWarning::NoTitle),
        ("no-description.rss", ChannelWarning::NoDescription),
        ("no-language.rss", ChannelWarning::NoLanguage),
        ("no-artwork.rss", ChannelWarning::NoArtwork),
        ("no-categories.rss", ChannelWarning::NoCategories),
        ("no-explicit.rss", ChannelWarning::NoExplicit),
    ];

    for (name, code) in cases {
        let report = run_fixture(name);
        assert!(report.passes(), "{} should pass", name);
        assert!(report.has_warnings(), "{} should warn", name);
        assert!(report.has_warning(code), "{} should warn {}", name, code);
        assert_eq!(report.warnings().len(), 1, "{} warns only {}", name, code);
    }
}

#[test]
fn test_recommends_author() {
    let report = run_fixture("no-author.rss");
    assert!(report.passes());
    assert!(report.has_recommendations());
    assert!(report.has_recommendation(ChannelRecommendation::AddAuthor));
    assert_eq!(report.recommendations().len(), 1);
}

#[test]
fn test_recommends_link() {
    let report = run_fixture("no-link.rss");
    assert!(report.passes());
    assert!(report.has_recommendation(ChannelRecommendation::AddLink));
}

#[test]
fn test_recommends_owner() {
    let report = run_fixture("no-owner.rss");
    assert!(report.passes());
    assert!(report.has_recommendation(ChannelRecommendation::AddOwner));
    assert!(!report.has_recommendation(ChannelRecommendation::AddOwnerEmail));
}

#[test]
fn test_recommends_owner_email() {
    let report = run_fixture("no-owner-email.rss");
    assert!(report.passes());
    assert!(report.has_recommendation(ChannelRecommendation::AddOwnerEmail));
    assert!(!report.has_recommendation(ChannelRecommendation::AddOwner));
}

// ===== Episode rules =====

#[test]
fn test_warns_if_episode_has_no_title() {
    let report = run_fixture("episode-without-title.rss");
    let episode = &report.episodes()[0];
    assert!(episode.has_warnings());
    assert!(episode.has_warning(EpisodeWarning::NoTitle));
    // Episodes are judged independently
    assert!(report.episodes()[1].is_clean());
}

#[test]
fn test_warns_only_for_the_untitled_episode() {
    let report = run_fixture("middle-episode-without-title.rss");
    assert!(report.passes());
    assert_eq!(report.item_count(), 3);

    let episodes = report.episodes();
    assert!(episodes[0].is_clean());
    assert!(episodes[1].has_warning(EpisodeWarning::NoTitle));
    assert_eq!(episodes[1].warnings().len(), 1);
    assert!(episodes[2].is_clean());

    let flagged: Vec<usize> = report.episodes_with_findings().map(|(i, _)| i).collect();
    assert_eq!(flagged, vec![1]);
}

#[test]
fn test_warns_if_episode_has_no_media() {
    let report = run_fixture("episode-without-enclosure.rss");
    let episode = &report.episodes()[0];
    assert!(episode.has_warning(EpisodeWarning::NoMedia));
    assert!(episode.passes());
}

#[test]
fn test_recommends_episode_fields() {
    let report = run_fixture("episodes-without-recommended-fields.rss");
    let episode = &report.episodes()[0];
    assert!(episode.has_recommendations());
    for code in EpisodeRecommendation::all() {
        assert!(episode.has_recommendation(*code), "missing {}", code);
    }
    assert!(!episode.has_warnings());
}

// ===== Whole feed =====

#[test]
fn test_passes_valid_feed() {
    let report = run_fixture("full.rss");
    assert!(report.passes());
    assert!(report.found());
    assert!(report.is_rss());
    assert!(report.has_channel());
    assert!(!report.has_warnings());
    assert!(!report.has_recommendations());
    assert_eq!(report.item_count(), 2);

    for episode in report.episodes() {
        assert!(episode.passes());
        assert!(!episode.has_warnings());
        assert!(!episode.has_recommendations());
    }
    assert_eq!(report.episodes_with_findings().count(), 0);
    assert_eq!(report.summary().total(), 0);
}

#[test]
fn test_validation_is_idempotent() {
    let mut validator = FeedValidator::new();
    validator.load(fixture("invalid-itunes-categories.rss"));
    assert_eq!(validator.run(), validator.run());
}

#[test]
fn test_file_and_string_agree() {
    let content = fs::read_to_string(fixture("no-owner.rss")).expect("Failed to read fixture");
    let from_string = validate_str(&content);
    let from_file = run_fixture("no-owner.rss");

    assert_eq!(from_string.warnings(), from_file.warnings());
    assert_eq!(from_string.recommendations(), from_file.recommendations());
    assert_eq!(from_string.episodes(), from_file.episodes());
}

#[test]
fn test_summary_counts_episode_findings() {
    let report = run_fixture("episodes-without-recommended-fields.rss");
    let summary = report.summary();
    assert_eq!(summary.episodes, 2);
    assert_eq!(summary.episodes_with_findings, 1);
    assert_eq!(summary.recommendations, EpisodeRecommendation::all().len());

    let (index, _) = report
        .episodes_with_findings()
        .next()
        .expect("One episode has findings");
    assert_eq!(index, 0);
}
