//! Finding codes reported by the validator
//!
//! Codes are grouped into disjoint namespaces, one enum per namespace:
//! - [`ErrorCode`]: structural problems that make the feed unusable
//! - [`ChannelWarning`] / [`EpisodeWarning`]: missing fields iTunes requires
//! - [`ChannelRecommendation`] / [`EpisodeRecommendation`]: missing
//!   best-practice fields
//!
//! The string form of every code is part of the public contract and never
//! changes. Two namespaces may share a string (`no_title` is both a channel
//! and an episode warning) without the codes ever being interchangeable.

use crate::error::{CodeError, CodeResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// Severity tier of a finding, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory: a best-practice field is missing
    Recommendation,
    /// Quality issue: a field iTunes requires is missing or invalid
    Warning,
    /// Fatal: the feed cannot be used at all
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recommendation => write!(f, "recommendation"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Shared behaviour of every code namespace
pub trait FindingCode:
    Copy + Ord + Hash + fmt::Debug + fmt::Display + Serialize + Send + Sync + 'static
{
    /// Severity tier of every code in this namespace
    const SEVERITY: Severity;

    /// Returns the stable wire string for this code
    fn as_str(&self) -> &'static str;

    /// Returns every code in the namespace, in declaration order
    fn all() -> &'static [Self];

    /// Looks a code up by its wire string
    fn from_code(code: &str) -> CodeResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|candidate| candidate.as_str() == code)
            .ok_or_else(|| CodeError::UnknownCode {
                severity: Self::SEVERITY,
                code: code.to_string(),
            })
    }
}

macro_rules! finding_codes {
    (
        $(#[$meta:meta])*
        $name:ident ($severity:expr) {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl FindingCode for $name {
            const SEVERITY: Severity = $severity;

            fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }

            fn all() -> &'static [Self] {
                &[ $( Self::$variant, )+ ]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_code(s)
            }
        }
    };
}

finding_codes! {
    /// Structural errors; only the gate checker records these
    ErrorCode (Severity::Error) {
        /// The root element is not `<rss>`
        TagNotRss => "tag_not_rss",
        /// The root element has no `version` attribute
        MissingRssVersion => "missing_rss_version",
        /// The `version` attribute is not `2.0`
        WrongRssVersion => "wrong_rss_version",
        /// The iTunes podcast namespace is never declared
        MissingItunesNs => "missing_itunes_ns",
    }
}

finding_codes! {
    /// Channel-level fields iTunes requires
    ChannelWarning (Severity::Warning) {
        NoItems => "no_items",
        NoTitle => "no_title",
        NoLanguage => "no_language",
        NoDescription => "no_description",
        NoArtwork => "no_artwork",
        NoCategories => "no_categories",
        NoExplicit => "no_explicit",
        /// At least one iTunes category is not in the taxonomy
        InvalidCategory => "invalid_category",
    }
}

finding_codes! {
    /// Episode-level fields iTunes requires
    EpisodeWarning (Severity::Warning) {
        NoTitle => "no_title",
        /// No enclosure with a media URL
        NoMedia => "no_media",
    }
}

finding_codes! {
    /// Channel-level best-practice fields
    ChannelRecommendation (Severity::Recommendation) {
        AddAuthor => "add_author",
        AddLink => "add_link",
        AddOwner => "add_owner",
        /// An owner is present but has no email address
        AddOwnerEmail => "add_owner_email",
    }
}

finding_codes! {
    /// Episode-level best-practice fields
    EpisodeRecommendation (Severity::Recommendation) {
        AddGuid => "add_guid",
        AddPubDate => "add_pub_date",
        AddDescription => "add_description",
        AddExplicit => "add_explicit",
        AddArtwork => "add_artwork",
        AddDuration => "add_duration",
        AddLink => "add_link",
    }
}
