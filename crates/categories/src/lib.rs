//! Podcast category taxonomies
//!
//! ```rust
//! use castcheck_categories::{CategoryTaxonomy, ItunesCategories};
//!
//! let categories = ItunesCategories::new();
//! assert!(categories.has("Arts > Books"));
//! assert!(!categories.has("Technology > Podcasting"));
//! ```

mod itunes;
mod taxonomy;

pub use itunes::ItunesCategories;
pub use taxonomy::{split_key, CategoryTaxonomy, KEY_SEPARATOR};
