//! Filter engine: search term + selected tags -> visible entries.
//!
//! Matching is conjunctive across dimensions and disjunctive within one:
//! - text: case-insensitive substring of gloss, any variant, or description
//! - tags: entry shares at least one tag with the selection
//!
//! An empty dimension imposes no constraint. The search term is neither
//! trimmed nor diacritic-folded, so "bac" does not match "BÁC".

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::Entry;

/// Current search and tag selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text search (possibly empty)
    pub search_term: String,

    /// Selected domain tags (possibly empty)
    pub selected_tags: BTreeSet<String>,
}

impl FilterCriteria {
    /// Criteria that match everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Add a selected tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.selected_tags.insert(tag.into());
        self
    }

    /// Add multiple selected tags
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.selected_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Select the tag if absent, deselect it if present.
    /// Returns whether the tag is selected afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.selected_tags.remove(tag) {
            false
        } else {
            self.selected_tags.insert(tag.to_string());
            true
        }
    }

    /// Reset search term and tags
    pub fn clear(&mut self) {
        self.search_term.clear();
        self.selected_tags.clear();
    }

    /// True when no dimension is applied
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.selected_tags.is_empty()
    }

    /// Check a single entry against the criteria
    pub fn matches(&self, entry: &Entry) -> bool {
        let text_ok = self.search_term.is_empty()
            || text_matches(entry, &self.search_term.to_lowercase());
        text_ok && self.tags_match(entry)
    }

    fn tags_match(&self, entry: &Entry) -> bool {
        self.selected_tags.is_empty()
            || entry
                .domain_tags
                .iter()
                .any(|tag| self.selected_tags.contains(tag))
    }
}

/// `term_lower` must already be lowercased
fn text_matches(entry: &Entry, term_lower: &str) -> bool {
    entry.gloss.to_lowercase().contains(term_lower)
        || entry
            .variants
            .iter()
            .any(|v| v.to_lowercase().contains(term_lower))
        || entry.description.to_lowercase().contains(term_lower)
}

/// Filter entries, preserving input order
pub fn filter<'a>(entries: &'a [Entry], criteria: &FilterCriteria) -> Vec<&'a Entry> {
    if criteria.is_empty() {
        return entries.iter().collect();
    }

    let term_lower = criteria.search_term.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            (term_lower.is_empty() || text_matches(entry, &term_lower))
                && criteria.tags_match(entry)
        })
        .collect()
}

/// Every tag used anywhere in the (unfiltered) catalog
pub fn collect_tags(entries: &[Entry]) -> BTreeSet<String> {
    entries
        .iter()
        .flat_map(|entry| entry.domain_tags.iter().cloned())
        .collect()
}
