// crates/feed-parser/src/error.rs
//! Error types for feed parsing

use quick_xml::events::attributes::AttrError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for feed parser operations
pub type FeedResult<T> = Result<T, FeedError>;

/// Errors that can occur while loading or parsing a feed
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed file does not exist
    #[error("Feed not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The feed file exists but could not be read
    #[error("Failed to read feed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not well-formed XML
    #[error("Invalid markup: {0}")]
    InvalidMarkup(String),
}

impl FeedError {
    /// Returns true if the feed file was missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, FeedError::NotFound { .. })
    }

    pub(crate) fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            FeedError::NotFound { path }
        } else {
            FeedError::Io { path, source }
        }
    }
}

impl From<quick_xml::Error> for FeedError {
    fn from(err: quick_xml::Error) -> Self {
        FeedError::InvalidMarkup(err.to_string())
    }
}

impl From<AttrError> for FeedError {
    fn from(err: AttrError) -> Self {
        FeedError::InvalidMarkup(format!("malformed attribute: {}", err))
    }
}
