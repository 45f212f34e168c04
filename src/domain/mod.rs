//! Domain types for the sign dictionary.
//!
//! This module contains the static catalog records:
//! - Category: Sidebar grouping of entries
//! - Entry: One sign video with its gloss, variants and metadata
//! - Media: Helpers for the media URLs entries point at

pub mod category;
pub mod entry;
pub mod media;

// Re-export commonly used types
pub use category::{Category, CategoryId};
pub use entry::{Entry, EntryId, Example, Level, Signer};
pub use media::{embed_url, is_youtube_url};
