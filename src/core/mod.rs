//! Core browsing logic.
//!
//! This module contains:
//! - Filter: search/tag matching over the catalog
//! - Selection: active category and entry derivation
//! - Bookmarks: persisted shortlist of entry ids
//! - Browser: the facade presentation code drives

pub mod bookmarks;
pub mod browser;
pub mod filter;
pub mod selection;

// Re-export commonly used types
pub use bookmarks::{BookmarkStore, ToggleOutcome, DEFAULT_BOOKMARKS_KEY};
pub use browser::{BookmarkStatus, Browser};
pub use filter::{collect_tags, filter, FilterCriteria};
pub use selection::{
    derive_state, pick_default_entry, SelectionCoordinator, SelectionError, SelectionEvent,
    SelectionPhase, SelectionState,
};
