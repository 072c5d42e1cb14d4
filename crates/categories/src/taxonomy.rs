// crates/categories/src/taxonomy.rs
//! Membership queries over a category list

use std::collections::{BTreeSet, HashSet};

/// Separator between a parent category and its subcategory in a key
pub const KEY_SEPARATOR: &str = " > ";

/// A set of category keys a feed may use
///
/// Keys are the category `text` for top-level categories and
/// `"Parent > Child"` for subcategories. Matching is exact and case-sensitive.
pub trait CategoryTaxonomy {
    /// Returns true if `key` names a category in this taxonomy
    fn has(&self, key: &str) -> bool;
}

impl<T: CategoryTaxonomy + ?Sized> CategoryTaxonomy for &T {
    fn has(&self, key: &str) -> bool {
        (**self).has(key)
    }
}

impl CategoryTaxonomy for HashSet<String> {
    fn has(&self, key: &str) -> bool {
        self.contains(key)
    }
}

impl CategoryTaxonomy for BTreeSet<String> {
    fn has(&self, key: &str) -> bool {
        self.contains(key)
    }
}

/// Splits a key into its parent and, for subcategories, the child name
pub fn split_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once(KEY_SEPARATOR) {
        Some((parent, child)) => (parent, Some(child)),
        None => (key, None),
    }
}
