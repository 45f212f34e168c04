//! Catalog Loading Integration Tests
//!
//! Loads the bundled sample catalog and drives a browsing session over it.

use std::path::PathBuf;
use std::sync::Arc;

use signdict::core::BookmarkStatus;
use signdict::library::{CatalogSource, FileSource};
use signdict::{BookmarkStore, Browser, CategoryId, EntryId, MemoryStore, SelectionEvent};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("catalogs")
        .join("sample.yaml")
}

#[tokio::test]
async fn test_sample_catalog_loads() {
    let catalog = FileSource::new(sample_path()).load().await.unwrap();

    assert_eq!(catalog.categories().len(), 3);
    assert_eq!(catalog.len(), 5);

    let bac_si = catalog.entry(&EntryId::from("bac-si")).unwrap();
    assert_eq!(bac_si.variants, vec!["DOCTOR", "PHYSICIAN"]);
    assert_eq!(
        bac_si.embed_url(),
        "https://www.youtube.com/embed/dQw4w9WgXcQ"
    );
}

#[tokio::test]
async fn test_browsing_session() {
    let catalog = Arc::new(FileSource::new(sample_path()).load().await.unwrap());
    let mut browser = Browser::new(catalog, BookmarkStore::open(MemoryStore::new()));

    // Starts in the first category on its first entry
    assert_eq!(
        browser.selection().active_entry().unwrap().id,
        EntryId::from("bac-si")
    );

    // "nơi" only matches places; medical falls back to the hospital
    browser
        .apply(SelectionEvent::SetSearch("nơi".to_string()))
        .unwrap();
    assert_eq!(
        browser.selection().active_entry().unwrap().id,
        EntryId::from("benh-vien")
    );

    browser.toggle_active_bookmark().unwrap();
    assert_eq!(
        browser.active_bookmark(),
        Some(BookmarkStatus {
            bookmarked: true,
            count: 1
        })
    );

    // The law category has nothing at all
    browser
        .apply(SelectionEvent::SelectCategory(CategoryId::from("law")))
        .unwrap();
    assert!(browser.selection().active_entry().is_none());
    assert!(browser.active_bookmark().is_none());

    // Tag filter across categories: "địa điểm" keeps one entry per category
    browser.apply(SelectionEvent::ClearFilters).unwrap();
    browser
        .apply(SelectionEvent::ToggleTag("địa điểm".to_string()))
        .unwrap();
    assert_eq!(browser.selection().filtered_entries().len(), 2);
}
