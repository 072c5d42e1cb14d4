// crates/validator/src/options.rs
//! Knobs that change how a feed is judged

use castcheck_feed_parser::Document;

/// Validation options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Namespace URIs accepted as the iTunes namespace in addition to the
    /// `http` and `https` spellings of the canonical one
    pub extra_itunes_namespaces: Vec<String>,
    /// Evaluate episodes on the rayon thread pool
    pub parallel_episodes: bool,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts one more URI as the iTunes namespace
    pub fn with_itunes_namespace(mut self, uri: impl Into<String>) -> Self {
        self.extra_itunes_namespaces.push(uri.into());
        self
    }

    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel_episodes = enabled;
        self
    }

    /// Returns true if the document declares an accepted iTunes namespace
    pub fn accepts_itunes_namespace(&self, document: &Document) -> bool {
        document.declares_itunes_namespace()
            || self
                .extra_itunes_namespaces
                .iter()
                .any(|uri| document.declares_namespace(uri))
    }
}
