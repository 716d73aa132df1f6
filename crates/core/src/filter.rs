//! Name search over the catalog.

use std::cmp::Ordering;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::models::GameRecord;

/// Returns the games whose name contains `term` (case-insensitive), sorted by name.
///
/// An empty term keeps every game. Games with equal names keep their catalog order.
pub fn filter_catalog<'a>(games: &'a [GameRecord], term: &str) -> Vec<&'a GameRecord> {
    let needle = term.to_lowercase();
    let mut matches: Vec<&GameRecord> = games
        .iter()
        .filter(|game| name_matches(&game.name, &needle))
        .collect();
    matches.sort_by(|a, b| compare_names(&a.name, &b.name));
    matches
}

/// Case-insensitive substring test; `needle` must already be lowercased.
pub fn name_matches(name: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    name.to_lowercase().contains(needle)
}

/// Collation used for the list.
///
/// Base letters decide first (accents and case ignored), then unaccented before
/// accented, then lowercase before uppercase.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented_letters(a).cmp(accented_letters(b)))
        .then_with(|| case_order(a, b))
}

fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
}

fn accented_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (left, right) in a.chars().zip(b.chars()) {
        if left == right {
            continue;
        }
        match (left.is_lowercase(), right.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => return left.cmp(&right),
        }
    }
    a.chars().count().cmp(&b.chars().count())
}
