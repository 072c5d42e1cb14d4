// crates/validator/src/episode.rs
//! Per-episode rules

use castcheck_core::{EpisodeLedger, EpisodeRecommendation, EpisodeWarning};
use castcheck_feed_parser::Episode;
use rayon::prelude::*;

/// Evaluates one episode
///
/// Never fails: the returned ledger is always passed, whatever it records.
pub fn evaluate(episode: &Episode) -> EpisodeLedger {
    let mut ledger = EpisodeLedger::new();

    if episode.title.is_none() {
        ledger.add_warning(EpisodeWarning::NoTitle);
    }
    if !episode.has_media() {
        ledger.add_warning(EpisodeWarning::NoMedia);
    }

    let recommended = [
        (episode.description.is_some(), EpisodeRecommendation::AddDescription),
        (episode.published.is_some(), EpisodeRecommendation::AddPubDate),
        (episode.guid.is_some(), EpisodeRecommendation::AddGuid),
        (episode.explicit.is_some(), EpisodeRecommendation::AddExplicit),
        (episode.duration.is_some(), EpisodeRecommendation::AddDuration),
        (episode.link.is_some(), EpisodeRecommendation::AddLink),
        (episode.artwork.is_some(), EpisodeRecommendation::AddArtwork),
    ];
    for (present, code) in recommended {
        if !present {
            ledger.add_recommendation(code);
        }
    }

    ledger.pass();
    ledger
}

/// Evaluates every episode, keeping document order
pub fn evaluate_all(episodes: &[Episode], parallel: bool) -> Vec<EpisodeLedger> {
    if parallel {
        episodes.par_iter().map(evaluate).collect()
    } else {
        episodes.iter().map(evaluate).collect()
    }
}
