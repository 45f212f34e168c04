//! Browser: the surface presentation collaborators talk to.
//!
//! Wraps the selection coordinator and the bookmark store. Bookmarks are
//! consulted and toggled through the active entry only.

use std::sync::Arc;

use super::bookmarks::{BookmarkStore, ToggleOutcome};
use super::selection::{SelectionCoordinator, SelectionError, SelectionEvent, SelectionState};
use crate::library::Catalog;
use crate::storage::KeyValueStore;

/// Bookmark toggle state for the active entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookmarkStatus {
    pub bookmarked: bool,
    pub count: usize,
}

pub struct Browser<S: KeyValueStore = Box<dyn KeyValueStore>> {
    selection: SelectionCoordinator,
    bookmarks: BookmarkStore<S>,
}

impl<S: KeyValueStore> Browser<S> {
    pub fn new(catalog: Arc<Catalog>, bookmarks: BookmarkStore<S>) -> Self {
        Self {
            selection: SelectionCoordinator::new(catalog),
            bookmarks,
        }
    }

    pub fn selection(&self) -> &SelectionCoordinator {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionCoordinator {
        &mut self.selection
    }

    pub fn bookmarks(&self) -> &BookmarkStore<S> {
        &self.bookmarks
    }

    pub fn bookmarks_mut(&mut self) -> &mut BookmarkStore<S> {
        &mut self.bookmarks
    }

    /// Forward a user action to the coordinator
    pub fn apply(&mut self, event: SelectionEvent) -> Result<&SelectionState, SelectionError> {
        self.selection.apply(event)
    }

    /// Bookmark state of the active entry, if any
    pub fn active_bookmark(&self) -> Option<BookmarkStatus> {
        let id = self.selection.state().active_entry.as_ref()?;
        Some(BookmarkStatus {
            bookmarked: self.bookmarks.is_bookmarked(id),
            count: self.bookmarks.count(),
        })
    }

    /// Toggle the bookmark of the active entry; `None` when nothing is active
    pub fn toggle_active_bookmark(&mut self) -> Option<ToggleOutcome> {
        let id = self.selection.state().active_entry.clone()?;
        Some(self.bookmarks.toggle(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, CategoryId, Entry};
    use crate::storage::MemoryStore;

    fn browser() -> Browser<MemoryStore> {
        let catalog = Catalog::new(
            vec![Category::new("c1", "One"), Category::new("c2", "Two")],
            vec![Entry::new("e1", "ALPHA", "c1")],
        )
        .unwrap();
        Browser::new(Arc::new(catalog), BookmarkStore::open(MemoryStore::new()))
    }

    #[test]
    fn test_toggle_active_bookmark() {
        let mut browser = browser();

        assert_eq!(
            browser.active_bookmark(),
            Some(BookmarkStatus {
                bookmarked: false,
                count: 0
            })
        );

        let outcome = browser.toggle_active_bookmark().unwrap();
        assert!(outcome.bookmarked);
        assert_eq!(browser.active_bookmark().unwrap().count, 1);
    }

    #[test]
    fn test_no_bookmark_without_active_entry() {
        let mut browser = browser();
        browser
            .apply(SelectionEvent::SelectCategory(CategoryId::from("c2")))
            .unwrap();

        assert!(browser.active_bookmark().is_none());
        assert!(browser.toggle_active_bookmark().is_none());
        assert_eq!(browser.bookmarks().count(), 0);
    }
}
