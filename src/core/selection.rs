//! Selection coordinator: keeps the active category and active entry in
//! step with the filter results.
//!
//! The state is always recomputed by [`derive_state`], a pure reducer over
//! (catalog, category, criteria, preferred entry). The coordinator only
//! decides *which* preferred entry to pass in:
//! - category change: none, so the category's first match wins
//! - criteria change: the current entry, kept only if it still matches
//! - explicit entry selection bypasses the reducer, and may point into
//!   another category until the next recomputation, but never at an entry
//!   the current filters exclude

use std::collections::BTreeSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::filter::{collect_tags, filter, FilterCriteria};
use crate::domain::{Category, CategoryId, Entry, EntryId};
use crate::library::Catalog;

/// Errors from selection events
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown category: {0}")]
    UnknownCategory(CategoryId),

    #[error("Unknown entry: {0}")]
    UnknownEntry(EntryId),

    #[error("Entry does not match the current filters: {0}")]
    FilteredOut(EntryId),
}

/// Active category and entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub active_category: Option<CategoryId>,
    pub active_entry: Option<EntryId>,
}

/// Coarse phase of the selection state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// No category (only possible with an empty category list)
    None,
    /// Category active, nothing matches in it
    CategorySelected,
    /// Category and entry active
    EntrySelected,
}

impl SelectionState {
    pub fn phase(&self) -> SelectionPhase {
        match (&self.active_category, &self.active_entry) {
            (None, _) => SelectionPhase::None,
            (Some(_), None) => SelectionPhase::CategorySelected,
            (Some(_), Some(_)) => SelectionPhase::EntrySelected,
        }
    }
}

/// Default-entry policy: first entry of the category in filtered (catalog) order
pub fn pick_default_entry<'a>(filtered: &[&'a Entry], category: &CategoryId) -> Option<&'a Entry> {
    filtered
        .iter()
        .copied()
        .find(|entry| &entry.category_id == category)
}

/// Recompute the selection for the given inputs.
///
/// `preferred` survives only if it is in the filtered list and belongs to
/// `category`; otherwise [`pick_default_entry`] decides.
pub fn derive_state(
    catalog: &Catalog,
    category: Option<&CategoryId>,
    criteria: &FilterCriteria,
    preferred: Option<&EntryId>,
) -> SelectionState {
    let filtered = filter(catalog.entries(), criteria);
    derive_from_filtered(&filtered, category, preferred)
}

fn derive_from_filtered(
    filtered: &[&Entry],
    category: Option<&CategoryId>,
    preferred: Option<&EntryId>,
) -> SelectionState {
    let category = match category {
        Some(category) => category,
        None => return SelectionState::default(),
    };

    let kept = preferred.and_then(|id| {
        filtered
            .iter()
            .copied()
            .find(|entry| &entry.id == id && &entry.category_id == category)
    });

    SelectionState {
        active_category: Some(category.clone()),
        active_entry: kept
            .or_else(|| pick_default_entry(filtered, category))
            .map(|entry| entry.id.clone()),
    }
}

/// User actions that drive the coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    SelectCategory(CategoryId),
    SelectEntry(EntryId),
    SetSearch(String),
    ToggleTag(String),
    ClearFilters,
}

/// Owns the filter criteria and the selection derived from them
#[derive(Debug, Clone)]
pub struct SelectionCoordinator {
    catalog: Arc<Catalog>,
    criteria: FilterCriteria,
    /// Ids of the current filter result, in catalog order
    filtered: Vec<EntryId>,
    /// Tag universe of the full catalog
    tags: BTreeSet<String>,
    state: SelectionState,
}

impl SelectionCoordinator {
    /// Start with empty criteria and the first category selected
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let criteria = FilterCriteria::new();
        let tags = collect_tags(catalog.entries());
        let filtered = catalog.entries().iter().map(|e| e.id.clone()).collect();
        let state = derive_state(
            &catalog,
            catalog.first_category().map(|c| &c.id),
            &criteria,
            None,
        );

        debug!(?state, "Selection initialized");

        Self {
            catalog,
            criteria,
            filtered,
            tags,
            state,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// All tags of the full catalog (does not shrink while filtering)
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Current filter result across all categories
    pub fn filtered_entries(&self) -> Vec<&Entry> {
        self.filtered
            .iter()
            .filter_map(|id| self.catalog.entry(id))
            .collect()
    }

    /// Filter result restricted to the active category
    pub fn visible_entries(&self) -> Vec<&Entry> {
        match &self.state.active_category {
            Some(category) => self
                .filtered_entries()
                .into_iter()
                .filter(|entry| &entry.category_id == category)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn active_category(&self) -> Option<&Category> {
        self.state
            .active_category
            .as_ref()
            .and_then(|id| self.catalog.category(id))
    }

    pub fn active_entry(&self) -> Option<&Entry> {
        self.state
            .active_entry
            .as_ref()
            .and_then(|id| self.catalog.entry(id))
    }

    /// Apply a user action
    pub fn apply(&mut self, event: SelectionEvent) -> Result<&SelectionState, SelectionError> {
        match event {
            SelectionEvent::SelectCategory(id) => self.select_category(&id),
            SelectionEvent::SelectEntry(id) => self.select_entry(&id),
            SelectionEvent::SetSearch(term) => Ok(self.set_search_term(term)),
            SelectionEvent::ToggleTag(tag) => {
                self.toggle_tag(&tag);
                Ok(&self.state)
            }
            SelectionEvent::ClearFilters => Ok(self.clear_filters()),
        }
    }

    /// Make a category active and pick its first matching entry.
    /// Re-selecting the active category changes nothing.
    pub fn select_category(&mut self, id: &CategoryId) -> Result<&SelectionState, SelectionError> {
        if self.catalog.category(id).is_none() {
            return Err(SelectionError::UnknownCategory(id.clone()));
        }

        if self.state.active_category.as_ref() == Some(id) {
            return Ok(&self.state);
        }

        let filtered: Vec<&Entry> = self.filtered_entries();
        let state = derive_from_filtered(&filtered, Some(id), None);
        self.state = state;

        debug!(category = %id, entry = ?self.state.active_entry, "Category selected");
        Ok(&self.state)
    }

    /// Make an entry active without touching the active category.
    /// The entry must be in the current filter result.
    pub fn select_entry(&mut self, id: &EntryId) -> Result<&SelectionState, SelectionError> {
        if self.catalog.entry(id).is_none() {
            return Err(SelectionError::UnknownEntry(id.clone()));
        }

        if !self.filtered.contains(id) {
            return Err(SelectionError::FilteredOut(id.clone()));
        }

        if self.state.active_category.is_none() {
            debug!(entry = %id, "Ignoring entry selection without an active category");
            return Ok(&self.state);
        }

        self.state.active_entry = Some(id.clone());
        debug!(entry = %id, "Entry selected");
        Ok(&self.state)
    }

    /// Replace the search term (called on every keystroke)
    pub fn set_search_term(&mut self, term: impl Into<String>) -> &SelectionState {
        self.criteria.search_term = term.into();
        self.refresh()
    }

    /// Toggle one tag; returns whether it is selected afterwards
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        let selected = self.criteria.toggle_tag(tag);
        self.refresh();
        selected
    }

    /// Replace all criteria at once
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> &SelectionState {
        self.criteria = criteria;
        self.refresh()
    }

    /// Drop search term and tags
    pub fn clear_filters(&mut self) -> &SelectionState {
        self.criteria.clear();
        self.refresh()
    }

    /// Re-run the filter and re-derive the selection, keeping the
    /// current entry when it still matches
    fn refresh(&mut self) -> &SelectionState {
        let filtered = filter(self.catalog.entries(), &self.criteria);
        let state = derive_from_filtered(
            &filtered,
            self.state.active_category.as_ref(),
            self.state.active_entry.as_ref(),
        );
        self.filtered = filtered.iter().map(|e| e.id.clone()).collect();

        if state != self.state {
            debug!(?state, "Selection re-derived after criteria change");
        }
        self.state = state;
        &self.state
    }
}
