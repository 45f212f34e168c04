//! signdict - Sign language video dictionary core
//!
//! A browsable catalog of short sign videos ("entries"). Each entry has a
//! gloss, synonyms, a description, domain tags and a category. Users narrow
//! the catalog with a search term and tag selection, browse by category,
//! and keep a persisted shortlist of bookmarks.
//!
//! # Architecture
//!
//! Everything in the core is synchronous and single-user:
//! - The catalog is loaded once and never mutated
//! - Filtering is a pure function of (catalog, criteria)
//! - The active category/entry is re-derived after every input change
//! - Bookmarks go through an injected key-value storage port
//!
//! # Modules
//!
//! - `domain`: Data structures (Category, Entry, media helpers)
//! - `library`: Catalog store and catalog sources (file, HTTP)
//! - `core`: Filter engine, selection coordinator, bookmarks, browser
//! - `storage`: Key-value storage port and backends (memory, file, SQLite)
//! - `config`: Paths and settings
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Browse the medical category, searching for "bác"
//! signdict browse --category medical --search bác
//!
//! # Toggle a bookmark
//! signdict bookmark bac-si
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod library;
pub mod storage;

// Re-export main types at crate root for convenience
pub use crate::core::{
    collect_tags, derive_state, filter, pick_default_entry, BookmarkStore, Browser,
    FilterCriteria, SelectionCoordinator, SelectionEvent, SelectionState, ToggleOutcome,
};
pub use domain::{Category, CategoryId, Entry, EntryId, Level};
pub use library::{Catalog, CatalogError};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, SqliteStore, StorageError};
