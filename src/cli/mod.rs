//! Command-line interface for signdict.
//!
//! A thin harness over the core: loads the catalog, replays the browsing
//! actions given as flags through the [`Browser`], and prints what a
//! front end would render.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config;
use crate::core::{BookmarkStore, Browser, FilterCriteria, SelectionEvent};
use crate::domain::{CategoryId, Entry, EntryId};
use crate::library::{source_from_location, Catalog};
use crate::storage::{open_store, KeyValueStore, MemoryStore, StorageBackend};

/// signdict - Sign language video dictionary
#[derive(Parser, Debug)]
#[command(name = "signdict")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog file or URL (overrides config)
    #[arg(long, global = true, env = "SIGNDICT_CATALOG")]
    pub catalog: Option<String>,

    /// Bookmark storage backend (overrides config)
    #[arg(long, global = true, value_enum)]
    pub storage: Option<StorageArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List categories
    Categories,

    /// List every domain tag in the catalog
    Tags,

    /// Browse a category with optional search and tag filters
    Browse {
        /// Category ID (defaults to the first category)
        #[arg(short, long)]
        category: Option<String>,

        /// Search term (gloss, variants, description)
        #[arg(short, long)]
        search: Option<String>,

        /// Tag to filter by (repeatable, any tag matches)
        #[arg(short, long)]
        tag: Vec<String>,

        /// Entry to select explicitly after filtering
        #[arg(long)]
        select: Option<String>,
    },

    /// Show details of an entry
    Show {
        /// Entry ID
        entry_id: String,
    },

    /// Toggle the bookmark of an entry
    Bookmark {
        /// Entry ID
        entry_id: String,
    },

    /// List bookmarked entries
    Bookmarks,

    /// Show resolved configuration (debug)
    Config,
}

/// Storage backend for CLI (maps to StorageBackend)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StorageArg {
    /// JSON file in the signdict home
    File,

    /// SQLite database in the signdict home
    Sqlite,

    /// In-memory only (nothing persisted)
    Memory,
}

impl From<StorageArg> for StorageBackend {
    fn from(s: StorageArg) -> Self {
        match s {
            StorageArg::File => StorageBackend::File,
            StorageArg::Sqlite => StorageBackend::Sqlite,
            StorageArg::Memory => StorageBackend::Memory,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let Cli {
            catalog,
            storage,
            command,
        } = self;

        match command {
            Commands::Categories => list_categories(catalog).await,
            Commands::Tags => list_tags(catalog).await,
            Commands::Browse {
                category,
                search,
                tag,
                select,
            } => browse(catalog, storage, category, search, tag, select).await,
            Commands::Show { entry_id } => show_entry(catalog, storage, &entry_id).await,
            Commands::Bookmark { entry_id } => toggle_bookmark(catalog, storage, &entry_id).await,
            Commands::Bookmarks => list_bookmarks(catalog, storage).await,
            Commands::Config => show_config(),
        }
    }
}

/// Load the catalog from the flag or the configured location
async fn load_catalog(location: Option<String>) -> Result<Arc<Catalog>> {
    let location = match location {
        Some(location) => location,
        None => config::config()?.catalog.clone(),
    };

    let source = source_from_location(&location);
    let catalog = source
        .load()
        .await
        .with_context(|| format!("Failed to load catalog from {}", source.describe()))?;

    Ok(Arc::new(catalog))
}

/// Open the bookmark store; an unavailable backend degrades to memory
fn open_bookmarks(storage: Option<StorageArg>) -> Result<BookmarkStore<Box<dyn KeyValueStore>>> {
    let cfg = config::config()?;
    let backend = storage
        .map(StorageBackend::from)
        .unwrap_or(cfg.storage.backend);

    let store = match open_store(backend, cfg.storage_file(), cfg.storage_db()) {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!(%backend, "Bookmark storage unavailable, using memory: {}", e);
            Box::new(MemoryStore::new())
        }
    };

    Ok(BookmarkStore::with_key(store, cfg.storage.bookmarks_key.clone()))
}

/// Truncate on character boundaries (glosses are not ASCII)
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

fn print_entry_row(entry: &Entry, marker: &str) {
    println!(
        "{:<2} {:<16} {:<24} {:<40}",
        marker,
        entry.id.as_str(),
        truncate(&entry.gloss, 24),
        truncate(&entry.domain_tags.join(", "), 40)
    );
}

/// List categories
async fn list_categories(location: Option<String>) -> Result<()> {
    let catalog = load_catalog(location).await?;

    if catalog.categories().is_empty() {
        println!("Catalog has no categories.");
        return Ok(());
    }

    println!("{:<16} {:<30} {:>8}", "ID", "NAME", "ENTRIES");
    println!("{}", "-".repeat(56));

    for category in catalog.categories() {
        println!(
            "{:<16} {:<30} {:>8}",
            category.id.as_str(),
            truncate(&category.name, 30),
            catalog.entries_in_category(&category.id).len()
        );
    }

    Ok(())
}

/// List the tag universe
async fn list_tags(location: Option<String>) -> Result<()> {
    let catalog = load_catalog(location).await?;
    let tags = crate::core::collect_tags(catalog.entries());

    if tags.is_empty() {
        println!("No tags in catalog.");
    } else {
        for tag in tags {
            println!("{}", tag);
        }
    }

    Ok(())
}

/// Criteria from the browse flags. Repeated tags select once.
fn browse_criteria(search: Option<String>, tags: Vec<String>) -> FilterCriteria {
    FilterCriteria::new()
        .with_search(search.unwrap_or_default())
        .with_tags(tags)
}

/// Replay browsing actions and print the resulting view
async fn browse(
    location: Option<String>,
    storage: Option<StorageArg>,
    category: Option<String>,
    search: Option<String>,
    tags: Vec<String>,
    select: Option<String>,
) -> Result<()> {
    let catalog = load_catalog(location).await?;
    let mut browser = Browser::new(catalog, open_bookmarks(storage)?);

    if let Some(category) = category {
        browser.apply(SelectionEvent::SelectCategory(CategoryId::new(category)))?;
    }
    let criteria = browse_criteria(search, tags);
    if !criteria.is_empty() {
        browser.selection_mut().set_criteria(criteria);
    }
    if let Some(entry) = select {
        browser.apply(SelectionEvent::SelectEntry(EntryId::new(entry)))?;
    }

    let selection = browser.selection();
    let category = match selection.active_category() {
        Some(category) => category,
        None => {
            println!("Catalog has no categories.");
            return Ok(());
        }
    };

    let visible = selection.visible_entries();
    println!("Entries in \"{}\" ({} shown)", category.name, visible.len());
    println!("{}", "-".repeat(84));

    if visible.is_empty() {
        println!("No entries match in this category.");
    }

    let active_id = selection.state().active_entry.as_ref();
    for entry in &visible {
        let marker = if Some(&entry.id) == active_id { ">" } else { "" };
        print_entry_row(entry, marker);
    }

    if let Some(entry) = selection.active_entry() {
        println!();
        println!("Active: {} ({})", entry.gloss, entry.id);
        println!("Media:  {}", entry.embed_url());
        if let Some(status) = browser.active_bookmark() {
            let label = if status.bookmarked { "saved" } else { "not saved" };
            println!("Bookmark: {} ({} total)", label, status.count);
        }
    }

    Ok(())
}

/// Show details of an entry
async fn show_entry(
    location: Option<String>,
    storage: Option<StorageArg>,
    entry_id: &str,
) -> Result<()> {
    let catalog = load_catalog(location).await?;
    let id = EntryId::new(entry_id);
    let entry = catalog
        .entry(&id)
        .ok_or_else(|| anyhow::anyhow!("Entry not found: {}", entry_id))?;
    let bookmarks = open_bookmarks(storage)?;

    println!("{}", "=".repeat(64));
    println!("  ID: {}", entry.id);
    println!("  Gloss: {}", entry.gloss);
    if !entry.variants.is_empty() {
        println!("  Variants: {}", entry.variants.join(" • "));
    }
    println!("  Category: {}", entry.category_id);
    if let Some(level) = entry.level {
        println!("  Level: {}", level);
    }
    if !entry.domain_tags.is_empty() {
        println!("  Tags: {}", entry.domain_tags.join(", "));
    }
    println!("  Media: {}", entry.embed_url());
    let verified = if entry.signer.verified { " (verified)" } else { "" };
    println!("  Signer: {}{}", entry.signer.name, verified);
    println!("  Bookmarked: {}", bookmarks.is_bookmarked(&id));
    println!("{}", "=".repeat(64));

    if !entry.description.is_empty() {
        println!("\n{}", entry.description);
    }

    for example in &entry.examples {
        println!("\n  \"{}\"", example.text);
        println!("    {}", example.sign_sequence.join(" + "));
    }

    Ok(())
}

/// Toggle a bookmark by making the entry active first
async fn toggle_bookmark(
    location: Option<String>,
    storage: Option<StorageArg>,
    entry_id: &str,
) -> Result<()> {
    let catalog = load_catalog(location).await?;
    let mut browser = Browser::new(catalog, open_bookmarks(storage)?);

    browser.apply(SelectionEvent::SelectEntry(EntryId::new(entry_id)))?;
    let outcome = browser
        .toggle_active_bookmark()
        .ok_or_else(|| anyhow::anyhow!("No active entry to bookmark"))?;

    let action = if outcome.bookmarked { "Saved" } else { "Removed" };
    println!("{} {} ({} bookmarks)", action, entry_id, outcome.count);
    if !outcome.persisted {
        eprintln!("Warning: bookmark could not be written to storage");
    }

    Ok(())
}

/// List bookmarked entries
async fn list_bookmarks(location: Option<String>, storage: Option<StorageArg>) -> Result<()> {
    let bookmarks = open_bookmarks(storage)?;

    if bookmarks.count() == 0 {
        println!("No bookmarks yet. Use 'signdict bookmark <entry-id>' to save one.");
        return Ok(());
    }

    // Bookmarks outlive catalog versions; unknown ids are still listed
    let catalog = load_catalog(location).await.ok();

    println!("Saved {} entries:", bookmarks.count());
    for id in bookmarks.list() {
        match catalog.as_ref().and_then(|c| c.entry(&id)) {
            Some(entry) => print_entry_row(entry, ""),
            None => println!("{:<2} {:<16} (not in catalog)", "", id.as_str()),
        }
    }

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("signdict configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:     {}", cfg.home.display());
    println!("  Catalog:  {}", cfg.catalog);
    println!("  Storage:  {}", cfg.storage_file().display());
    println!("  Database: {}", cfg.storage_db().display());
    println!();
    println!("Bookmarks:");
    println!("  Backend: {}", cfg.storage.backend);
    println!("  Key:     {}", cfg.storage.bookmarks_key);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("BÁC SĨ", 10), "BÁC SĨ");
        assert_eq!(truncate("NGÔN NGỮ KÝ HIỆU", 10), "NGÔN NG...");
    }

    #[test]
    fn test_repeated_tag_flag_stays_selected() {
        let criteria = browse_criteria(
            Some("bác".to_string()),
            vec!["y tế".to_string(), "y tế".to_string()],
        );

        assert_eq!(criteria.search_term, "bác");
        assert_eq!(criteria.selected_tags.len(), 1);
        assert!(criteria.selected_tags.contains("y tế"));
    }

    #[test]
    fn test_cli_parses_browse_flags() {
        let cli = Cli::try_parse_from([
            "signdict",
            "--storage",
            "memory",
            "browse",
            "--category",
            "medical",
            "-t",
            "y tế",
            "-t",
            "cơ bản",
        ])
        .unwrap();

        assert!(matches!(cli.storage, Some(StorageArg::Memory)));
        match cli.command {
            Commands::Browse { category, tag, .. } => {
                assert_eq!(category.as_deref(), Some("medical"));
                assert_eq!(tag, vec!["y tế", "cơ bản"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
