// crates/feed-parser/src/lib.rs
//! Namespace-aware RSS reader for podcast feeds
//!
//! The parser turns feed text into a [`Document`]: the root element, its
//! `version`, every namespace declaration and the first channel with its
//! episodes. It enforces well-formedness only; deciding whether a document
//! is an acceptable podcast feed is left to the validator.
//!
//! # Example
//!
//! ```rust
//! use castcheck_feed_parser::FeedParser;
//!
//! let rss = r#"<?xml version="1.0"?>
//! <rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
//!   <channel>
//!     <title>My Podcast</title>
//!     <item>
//!       <title>Episode 1</title>
//!       <enclosure url="http://example.com/ep1.mp3" type="audio/mpeg"/>
//!     </item>
//!   </channel>
//! </rss>"#;
//!
//! let doc = FeedParser::parse(rss).expect("Failed to parse feed");
//! assert!(doc.declares_itunes_namespace());
//! let channel = doc.channel.expect("Feed has a channel");
//! println!("{:?} with {} episodes", channel.title, channel.episode_count());
//! ```

mod error;
mod feed;
mod parser;

pub use error::{FeedError, FeedResult};
pub use feed::{
    parse_duration, Category, CategoryScheme, Channel, Document, Enclosure, Episode, Explicit,
    NamespaceDecl, Owner, ITUNES_NAMESPACE, ITUNES_NAMESPACES, ITUNES_NAMESPACE_HTTPS,
};
pub use parser::FeedParser;
