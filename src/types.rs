//! Core types used throughout the project.

use indexmap::IndexMap;

/// Flat translation key map of one namespace file (e.g., "common.hello" -> "Hello").
///
/// Keeps the insertion order of the source file so that written files stay
/// deterministic and diff-friendly.
pub type TranslationMap = IndexMap<String, String>;

/// Returns true if both maps hold the same entries in the same order.
///
/// `IndexMap`'s `PartialEq` ignores order, which is not enough to decide
/// whether a file on disk needs to be rewritten.
#[must_use]
pub fn same_entries_in_order(left: &TranslationMap, right: &TranslationMap) -> bool {
    left.len() == right.len() && left.iter().eq(right.iter())
}
