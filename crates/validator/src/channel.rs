// crates/validator/src/channel.rs
//! Channel-level rules, run once every gate has passed

use crate::episode;
use crate::options::ValidationOptions;
use castcheck_categories::CategoryTaxonomy;
use castcheck_core::{ChannelRecommendation, ChannelWarning, FeedReport};
use castcheck_feed_parser::Channel;

/// Evaluates the channel and its episodes, then passes the report
pub fn evaluate<T: CategoryTaxonomy + ?Sized>(
    channel: &Channel,
    taxonomy: &T,
    options: &ValidationOptions,
    report: &mut FeedReport,
) {
    report.set_item_count(channel.episode_count());

    check_required(channel, report);
    check_categories(channel, taxonomy, report);
    check_recommended(channel, report);

    let episodes = episode::evaluate_all(&channel.episodes, options.parallel_episodes);
    log::debug!(
        "Evaluated {} episode(s){}",
        episodes.len(),
        if options.parallel_episodes { " in parallel" } else { "" }
    );
    report.attach_episodes(episodes);

    report.pass();
}

fn check_required(channel: &Channel, report: &mut FeedReport) {
    let required = [
        (channel.title.is_some(), ChannelWarning::NoTitle),
        (channel.description.is_some(), ChannelWarning::NoDescription),
        (channel.language.is_some(), ChannelWarning::NoLanguage),
        (channel.artwork.is_some(), ChannelWarning::NoArtwork),
        (channel.explicit.is_some(), ChannelWarning::NoExplicit),
    ];
    for (present, code) in required {
        if !present {
            report.add_warning(code);
        }
    }
}

fn check_categories<T: CategoryTaxonomy + ?Sized>(
    channel: &Channel,
    taxonomy: &T,
    report: &mut FeedReport,
) {
    if channel.categories.is_empty() {
        report.add_warning(ChannelWarning::NoCategories);
        return;
    }

    for category in channel.itunes_categories() {
        let key = category.key();
        if !taxonomy.has(&key) {
            log::debug!("Unknown iTunes category '{}'", key);
            report.add_warning(ChannelWarning::InvalidCategory);
        }
    }
}

fn check_recommended(channel: &Channel, report: &mut FeedReport) {
    if channel.author.is_none() {
        report.add_recommendation(ChannelRecommendation::AddAuthor);
    }
    if channel.link.is_none() {
        report.add_recommendation(ChannelRecommendation::AddLink);
    }

    match &channel.owner {
        None => {
            report.add_recommendation(ChannelRecommendation::AddOwner);
        }
        Some(owner) if owner.email.is_none() => {
            report.add_recommendation(ChannelRecommendation::AddOwnerEmail);
        }
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castcheck_categories::ItunesCategories;
    use castcheck_feed_parser::{Category, CategoryScheme, Episode, Owner};

    fn complete_channel() -> Channel {
        Channel {
            title: Some("Show".to_string()),
            description: Some("About the show".to_string()),
            language: Some("en".to_string()),
            artwork: Some("https://example.com/art.jpg".to_string()),
            explicit: Some("false".to_string()),
            categories: vec![Category::new(CategoryScheme::Itunes, "Technology")],
            author: Some("Host".to_string()),
            link: Some("https://example.com".to_string()),
            owner: Some(Owner {
                name: Some("Host".to_string()),
                email: Some("host@example.com".to_string()),
            }),
            episodes: vec![Episode::default()],
        }
    }

    fn run(channel: &Channel) -> FeedReport {
        let mut report = FeedReport::new();
        evaluate(
            channel,
            &ItunesCategories::new(),
            &ValidationOptions::default(),
            &mut report,
        );
        report
    }

    #[test]
    fn test_complete_channel() {
        let report = run(&complete_channel());
        assert!(report.passes());
        assert!(report.ledger().is_clean());
        assert_eq!(report.item_count(), 1);
        assert_eq!(report.episodes().len(), 1);
    }

    #[test]
    fn test_empty_channel_still_passes() {
        let report = run(&Channel::default());
        assert!(report.passes());
        for code in [
            ChannelWarning::NoItems,
            ChannelWarning::NoTitle,
            ChannelWarning::NoDescription,
            ChannelWarning::NoLanguage,
            ChannelWarning::NoArtwork,
            ChannelWarning::NoExplicit,
            ChannelWarning::NoCategories,
        ] {
            assert!(report.has_warning(code), "missing {}", code);
        }
        assert!(!report.has_warning(ChannelWarning::InvalidCategory));
        assert!(report.has_recommendation(ChannelRecommendation::AddOwner));
        assert!(!report.has_recommendation(ChannelRecommendation::AddOwnerEmail));
    }

    #[test]
    fn test_owner_without_email() {
        let mut channel = complete_channel();
        channel.owner = Some(Owner {
            name: Some("Host".to_string()),
            email: None,
        });

        let report = run(&channel);
        assert!(report.has_recommendation(ChannelRecommendation::AddOwnerEmail));
        assert!(!report.has_recommendation(ChannelRecommendation::AddOwner));
    }

    #[test]
    fn test_invalid_categories_deduplicated() {
        let mut channel = complete_channel();
        channel.categories = vec![
            Category::new(CategoryScheme::Itunes, "Podcasting"),
            Category::nested(CategoryScheme::Itunes, "Arts", "Gadgets"),
            Category::new(CategoryScheme::Itunes, "Arts"),
        ];

        let report = run(&channel);
        assert!(report.passes());
        assert_eq!(
            report.warnings().iter().copied().collect::<Vec<_>>(),
            vec![ChannelWarning::InvalidCategory]
        );
    }

    #[test]
    fn test_plain_rss_categories_are_not_checked() {
        let mut channel = complete_channel();
        channel.categories = vec![Category::new(CategoryScheme::Rss, "whatever")];

        let report = run(&channel);
        assert!(!report.has_warning(ChannelWarning::NoCategories));
        assert!(!report.has_warning(ChannelWarning::InvalidCategory));
    }

    #[test]
    fn test_custom_taxonomy() {
        let mut channel = complete_channel();
        channel.categories = vec![Category::new(CategoryScheme::Itunes, "Local")];
        let taxonomy: std::collections::HashSet<String> =
            std::iter::once("Local".to_string()).collect();

        let mut report = FeedReport::new();
        evaluate(
            &channel,
            &taxonomy,
            &ValidationOptions::default(),
            &mut report,
        );
        assert!(!report.has_warnings());
    }
}
