//! Catalog store: the immutable set of categories and entries.
//!
//! Built once at startup from a catalog document and never mutated
//! afterwards. Catalog order is significant: it drives the default
//! category and the default entry of each category.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Category, CategoryId, Entry, EntryId};

/// Errors raised while validating a catalog
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate category id: {0}")]
    DuplicateCategory(CategoryId),

    #[error("Duplicate entry id: {0}")]
    DuplicateEntry(EntryId),

    #[error("Entry {entry} references unknown category {category}")]
    UnknownCategory { entry: EntryId, category: CategoryId },
}

/// Serialized catalog (JSON or YAML)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Catalog format version
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default, alias = "videos")]
    pub entries: Vec<Entry>,
}

fn default_version() -> u32 {
    1
}

/// Validated, read-only catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    version: u32,
    categories: Vec<Category>,
    entries: Vec<Entry>,
    /// Entry id -> position in `entries`
    index: HashMap<EntryId, usize>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl Catalog {
    /// Create an empty catalog
    pub fn empty() -> Self {
        Self {
            version: default_version(),
            categories: Vec::new(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a catalog, checking id uniqueness and category references
    pub fn new(categories: Vec<Category>, entries: Vec<Entry>) -> Result<Self, CatalogError> {
        let mut category_ids = HashSet::new();
        for category in &categories {
            if !category_ids.insert(category.id.clone()) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (pos, entry) in entries.iter().enumerate() {
            if !category_ids.contains(&entry.category_id) {
                return Err(CatalogError::UnknownCategory {
                    entry: entry.id.clone(),
                    category: entry.category_id.clone(),
                });
            }
            if index.insert(entry.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateEntry(entry.id.clone()));
            }
        }

        Ok(Self {
            version: default_version(),
            categories,
            entries,
            index,
        })
    }

    /// Build a catalog from a parsed document
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(document.categories, document.entries)?;
        catalog.version = document.version;
        Ok(catalog)
    }

    /// Parse a JSON catalog document
    pub fn from_json(content: &str) -> Result<Self> {
        let document: CatalogDocument =
            serde_json::from_str(content).context("Failed to parse catalog JSON")?;
        Ok(Self::from_document(document)?)
    }

    /// Parse a YAML catalog document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let document: CatalogDocument =
            serde_yaml::from_str(content).context("Failed to parse catalog YAML")?;
        Ok(Self::from_document(document)?)
    }

    /// Convert back into a serializable document
    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            version: self.version,
            categories: self.categories.clone(),
            entries: self.entries.clone(),
        }
    }

    /// Catalog format version
    pub fn version(&self) -> u32 {
        self.version
    }

    /// All categories in catalog order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All entries in catalog order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The first category, used as the initial selection
    pub fn first_category(&self) -> Option<&Category> {
        self.categories.first()
    }

    /// Get a category by ID
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Get an entry by ID
    pub fn entry(&self, id: &EntryId) -> Option<&Entry> {
        self.index.get(id).map(|&pos| &self.entries[pos])
    }

    /// Entries of one category, in catalog order
    pub fn entries_in_category(&self, id: &CategoryId) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|entry| &entry.category_id == id)
            .collect()
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(
            vec![
                Category::new("medical", "Y tế"),
                Category::new("education", "Giáo dục"),
            ],
            vec![
                Entry::new("v1", "BÁC SĨ", "medical"),
                Entry::new("v2", "GIÁO VIÊN", "education"),
                Entry::new("v3", "Y TÁ", "medical"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = sample();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.first_category().unwrap().id.as_str(), "medical");
        assert_eq!(
            catalog.entry(&EntryId::from("v2")).unwrap().gloss,
            "GIÁO VIÊN"
        );
        assert!(catalog.entry(&EntryId::from("missing")).is_none());
        assert!(catalog.category(&CategoryId::from("education")).is_some());
    }

    #[test]
    fn test_entries_in_category_keeps_order() {
        let catalog = sample();
        let medical: Vec<_> = catalog
            .entries_in_category(&CategoryId::from("medical"))
            .iter()
            .map(|e| e.id.as_str())
            .collect();

        assert_eq!(medical, vec!["v1", "v3"]);
    }

    #[test]
    fn test_rejects_unknown_category() {
        let err = Catalog::new(
            vec![Category::new("medical", "Y tế")],
            vec![Entry::new("v1", "BÁC SĨ", "law")],
        )
        .unwrap_err();

        assert_eq!(
            err,
            CatalogError::UnknownCategory {
                entry: EntryId::from("v1"),
                category: CategoryId::from("law"),
            }
        );
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = Catalog::new(
            vec![Category::new("a", "A"), Category::new("a", "A again")],
            Vec::new(),
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateCategory(CategoryId::from("a")));

        let err = Catalog::new(
            vec![Category::new("a", "A")],
            vec![Entry::new("v1", "X", "a"), Entry::new("v1", "Y", "a")],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateEntry(EntryId::from("v1")));
    }

    #[test]
    fn test_from_json_accepts_videos_key() {
        let json = r#"{
            "categories": [{"id": "medical", "name": "Y tế", "icon": "stethoscope"}],
            "videos": [{"id": "v1", "gloss": "BÁC SĨ", "categoryId": "medical"}]
        }"#;

        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.version(), 1);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.categories()[0].icon, "stethoscope");
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.first_category().is_none());
    }
}
