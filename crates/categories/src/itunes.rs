// crates/categories/src/itunes.rs
//! The Apple Podcasts category list (2019 revision)

use crate::taxonomy::{split_key, CategoryTaxonomy, KEY_SEPARATOR};

/// Top-level categories and their subcategories
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Arts",
        &[
            "Books",
            "Design",
            "Fashion & Beauty",
            "Food",
            "Performing Arts",
            "Visual Arts",
        ],
    ),
    (
        "Business",
        &[
            "Careers",
            "Entrepreneurship",
            "Investing",
            "Management",
            "Marketing",
            "Non-Profit",
        ],
    ),
    ("Comedy", &["Comedy Interviews", "Improv", "Stand-Up"]),
    (
        "Education",
        &["Courses", "How To", "Language Learning", "Self-Improvement"],
    ),
    ("Fiction", &["Comedy Fiction", "Drama", "Science Fiction"]),
    ("Government", &[]),
    ("History", &[]),
    (
        "Health & Fitness",
        &[
            "Alternative Health",
            "Fitness",
            "Medicine",
            "Mental Health",
            "Nutrition",
            "Sexuality",
        ],
    ),
    (
        "Kids & Family",
        &[
            "Education for Kids",
            "Parenting",
            "Pets & Animals",
            "Stories for Kids",
        ],
    ),
    (
        "Leisure",
        &[
            "Animation & Manga",
            "Automotive",
            "Aviation",
            "Crafts",
            "Games",
            "Hobbies",
            "Home & Garden",
            "Video Games",
        ],
    ),
    (
        "Music",
        &["Music Commentary", "Music History", "Music Interviews"],
    ),
    (
        "News",
        &[
            "Business News",
            "Daily News",
            "Entertainment News",
            "News Commentary",
            "Politics",
            "Sports News",
            "Tech News",
        ],
    ),
    (
        "Religion & Spirituality",
        &[
            "Buddhism",
            "Christianity",
            "Hinduism",
            "Islam",
            "Judaism",
            "Religion",
            "Spirituality",
        ],
    ),
    (
        "Science",
        &[
            "Astronomy",
            "Chemistry",
            "Earth Sciences",
            "Life Sciences",
            "Mathematics",
            "Natural Sciences",
            "Nature",
            "Physics",
            "Social Sciences",
        ],
    ),
    (
        "Society & Culture",
        &[
            "Documentary",
            "Personal Journals",
            "Philosophy",
            "Places & Travel",
            "Relationships",
        ],
    ),
    (
        "Sports",
        &[
            "Baseball",
            "Basketball",
            "Cricket",
            "Fantasy Sports",
            "Football",
            "Golf",
            "Hockey",
            "Rugby",
            "Running",
            "Soccer",
            "Swimming",
            "Tennis",
            "Volleyball",
            "Wilderness",
            "Wrestling",
        ],
    ),
    ("Technology", &[]),
    ("True Crime", &[]),
    (
        "TV & Film",
        &[
            "After Shows",
            "Film History",
            "Film Interviews",
            "Film Reviews",
            "TV Reviews",
        ],
    ),
];

/// Apple's podcast category taxonomy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItunesCategories;

impl ItunesCategories {
    pub fn new() -> Self {
        Self
    }

    /// Top-level category names, in Apple's order
    pub fn top_level(&self) -> impl Iterator<Item = &'static str> {
        CATEGORIES.iter().map(|(name, _)| *name)
    }

    /// Subcategories of `parent`, or `None` if `parent` is not a top-level category
    pub fn subcategories(&self, parent: &str) -> Option<&'static [&'static str]> {
        CATEGORIES
            .iter()
            .find(|(name, _)| *name == parent)
            .map(|(_, children)| *children)
    }

    /// Every valid key, each parent followed by its subcategories
    pub fn keys(&self) -> Vec<String> {
        CATEGORIES
            .iter()
            .flat_map(|(parent, children)| {
                std::iter::once(parent.to_string()).chain(
                    children
                        .iter()
                        .map(move |child| format!("{}{}{}", parent, KEY_SEPARATOR, child)),
                )
            })
            .collect()
    }

    /// Number of valid keys
    pub fn len(&self) -> usize {
        CATEGORIES
            .iter()
            .map(|(_, children)| 1 + children.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        CATEGORIES.is_empty()
    }
}

impl CategoryTaxonomy for ItunesCategories {
    fn has(&self, key: &str) -> bool {
        let (parent, child) = split_key(key);
        match (self.subcategories(parent), child) {
            (Some(_), None) => true,
            (Some(children), Some(child)) => children.contains(&child),
            (None, _) => false,
        }
    }
}
