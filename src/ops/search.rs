use std::cmp::Ordering;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::model::project::Project;

/// Which field the project list is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Order,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "\u{2191}",
            SortDirection::Desc => "\u{2193}",
        }
    }
}

/// Current sort key and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            key: SortKey::Order,
            direction: SortDirection::Asc,
        }
    }
}

impl SortState {
    /// Selecting the active key flips the direction; selecting the other key
    /// switches to it in ascending order.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Asc;
        }
    }
}

/// Collation-style name comparison in three levels: base letters with
/// accents and case removed, then accents, then case with lowercase first.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| accented(a).cmp(&accented(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn accented(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

/// Does the project's name or any attached tag name contain `term_lower`?
/// `term_lower` must already be lowercased.
pub fn matches(project: &Project, term_lower: &str) -> bool {
    if term_lower.is_empty() {
        return true;
    }
    project.name.to_lowercase().contains(term_lower)
        || project
            .tags
            .iter()
            .any(|tag| tag.name.to_lowercase().contains(term_lower))
}

/// Derive the displayed sequence: filter by `term`, then order by `sort`.
pub fn filter_and_sort<'a>(projects: &'a [Project], term: &str, sort: SortState) -> Vec<&'a Project> {
    let term_lower = term.to_lowercase();
    let mut shown: Vec<&Project> = projects
        .iter()
        .filter(|p| matches(p, &term_lower))
        .collect();

    shown.sort_by(|a, b| {
        let ord = match sort.key {
            SortKey::Name => compare_names(&a.name, &b.name),
            SortKey::Order => a.order_idx.cmp(&b.order_idx),
        }
        .then_with(|| a.id.cmp(&b.id));
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    shown
}

/// Case-insensitive literal regex for highlighting `term`, or None if empty.
pub fn search_regex(term: &str) -> Option<Regex> {
    if term.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(term))).ok()
}
