//! Catalog loading and storage.
//!
//! The catalog is a single document listing categories and entries:
//!
//! ```text
//! version: 1
//! categories:
//!   - { id: medical, name: "Y tế", icon: stethoscope }
//! entries:
//!   - id: bac-si
//!     gloss: BÁC SĨ
//!     categoryId: medical
//!     domain_tags: [y tế, cơ bản]
//!     videoUrl: https://youtu.be/...
//! ```
//!
//! It may live in a local JSON/YAML file or behind an HTTP(S) URL.

pub mod catalog;
pub mod source;

pub use catalog::{Catalog, CatalogDocument, CatalogError};
pub use source::{source_from_location, CatalogSource, FileSource, HttpSource};
