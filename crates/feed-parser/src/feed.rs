// crates/feed-parser/src/feed.rs
//! Feed data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical iTunes podcast namespace URI
pub const ITUNES_NAMESPACE: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";

/// The same namespace spelled with `https`, which many hosts emit
pub const ITUNES_NAMESPACE_HTTPS: &str = "https://www.itunes.com/dtds/podcast-1.0.dtd";

/// Every spelling of the iTunes namespace recognized out of the box
pub const ITUNES_NAMESPACES: [&str; 2] = [ITUNES_NAMESPACE, ITUNES_NAMESPACE_HTTPS];

/// A namespace declared somewhere in the document (`xmlns` / `xmlns:prefix`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceDecl {
    /// Prefix, or `None` for a default namespace
    pub prefix: Option<String>,
    /// Namespace URI
    pub uri: String,
}

/// A parsed XML document, before any podcast-specific judgement is made
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Local name of the root element, without any prefix
    pub root: String,
    /// `version` attribute of the root element
    pub version: Option<String>,
    /// Namespaces declared anywhere in the document, in document order
    pub namespaces: Vec<NamespaceDecl>,
    /// First `<channel>` child of the root
    pub channel: Option<Channel>,
}

impl Document {
    /// Returns true if any element declares the given namespace URI
    pub fn declares_namespace(&self, uri: &str) -> bool {
        self.namespaces.iter().any(|ns| ns.uri == uri)
    }

    /// Returns true if any recognized spelling of the iTunes namespace is declared
    pub fn declares_itunes_namespace(&self) -> bool {
        ITUNES_NAMESPACES
            .iter()
            .any(|uri| self.declares_namespace(uri))
    }

    /// Returns true if the document has a channel
    pub fn has_channel(&self) -> bool {
        self.channel.is_some()
    }
}

/// Podcast-level metadata and the episode list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Channel {
    pub title: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    /// `<itunes:image href>`
    pub artwork: Option<String>,
    /// Raw `<itunes:explicit>` value
    pub explicit: Option<String>,
    /// iTunes and plain RSS categories, subcategories flattened after their parent
    pub categories: Vec<Category>,
    /// `<itunes:author>`
    pub author: Option<String>,
    pub link: Option<String>,
    /// `<itunes:owner>`
    pub owner: Option<Owner>,
    /// Episodes in document order
    pub episodes: Vec<Episode>,
}

impl Channel {
    /// Returns the number of episodes in the channel
    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }

    /// Returns true if the channel has no episodes
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Categories declared with `<itunes:category>`
    pub fn itunes_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories
            .iter()
            .filter(|c| c.scheme == CategoryScheme::Itunes)
    }

    /// Interpreted explicit flag, if the value is recognized
    pub fn explicit_flag(&self) -> Option<Explicit> {
        self.explicit.as_deref().and_then(Explicit::parse)
    }
}

/// `<itunes:owner>` contact details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Where a category was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryScheme {
    /// `<itunes:category text="...">`
    Itunes,
    /// Plain RSS `<category>`
    Rss,
}

/// A single category, with its parent when nested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub scheme: CategoryScheme,
    pub name: String,
    pub parent: Option<String>,
}

impl Category {
    /// Creates a top-level category
    pub fn new(scheme: CategoryScheme, name: impl Into<String>) -> Self {
        Self {
            scheme,
            name: name.into(),
            parent: None,
        }
    }

    /// Creates a subcategory nested under `parent`
    pub fn nested(scheme: CategoryScheme, parent: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            scheme,
            name: name.into(),
            parent: Some(parent.into()),
        }
    }

    /// Taxonomy key: `Name` or `Parent > Name`
    pub fn key(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{} > {}", parent, self.name),
            None => self.name.clone(),
        }
    }
}

/// Interpreted `<itunes:explicit>` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Explicit {
    Explicit,
    Clean,
}

impl Explicit {
    /// Parses the values Apple documents, plus the legacy `yes`/`no`/`clean`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "explicit" => Some(Explicit::Explicit),
            "false" | "no" | "clean" => Some(Explicit::Clean),
            _ => None,
        }
    }
}

/// A single item in the feed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Episode {
    pub title: Option<String>,
    /// Media file, present only when it carries a URL
    pub enclosure: Option<Enclosure>,
    pub description: Option<String>,
    /// `<pubDate>`, when it parses as a date
    pub published: Option<DateTime<Utc>>,
    pub guid: Option<String>,
    /// Raw `<itunes:explicit>` value
    pub explicit: Option<String>,
    /// Raw `<itunes:duration>` value
    pub duration: Option<String>,
    pub link: Option<String>,
    /// `<itunes:image href>`
    pub artwork: Option<String>,
}

impl Episode {
    /// Returns true if the episode has a playable media enclosure
    pub fn has_media(&self) -> bool {
        self.enclosure.is_some()
    }

    /// Returns the enclosure URL if available
    pub fn media_url(&self) -> Option<&str> {
        self.enclosure.as_ref().map(|e| e.url.as_str())
    }

    /// Interpreted explicit flag, if the value is recognized
    pub fn explicit_flag(&self) -> Option<Explicit> {
        self.explicit.as_deref().and_then(Explicit::parse)
    }

    /// Duration in seconds, if `<itunes:duration>` is `SS`, `MM:SS` or `HH:MM:SS`
    pub fn duration_seconds(&self) -> Option<u64> {
        self.duration.as_deref().and_then(parse_duration)
    }
}

/// Parses an `<itunes:duration>` value into seconds
pub fn parse_duration(value: &str) -> Option<u64> {
    let parts: Vec<&str> = value.trim().split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }

    let mut total: u64 = 0;
    for (i, part) in parts.iter().enumerate() {
        let n: u64 = part.parse().ok()?;
        // Only the leading component may exceed 59
        if i > 0 && n >= 60 {
            return None;
        }
        total = total.checked_mul(60)?.checked_add(n)?;
    }
    Some(total)
}

/// Media enclosure (typically audio or video)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    /// URL to the media file
    pub url: String,
    /// MIME type (e.g., "audio/mpeg")
    pub mime_type: Option<String>,
    /// File size in bytes
    pub length: Option<u64>,
}

impl Enclosure {
    /// Creates a new enclosure
    pub fn new(url: String) -> Self {
        Self {
            url,
            mime_type: None,
            length: None,
        }
    }

    /// Returns true if this is an audio enclosure
    pub fn is_audio(&self) -> bool {
        self.mime_type
            .as_ref()
            .is_some_and(|mime| mime.starts_with("audio/"))
    }

    /// Returns true if this is a video enclosure
    pub fn is_video(&self) -> bool {
        self.mime_type
            .as_ref()
            .is_some_and(|mime| mime.starts_with("video/"))
    }
}
