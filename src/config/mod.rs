//! Configuration for signdict.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (SIGNDICT_HOME, SIGNDICT_CATALOG)
//! 2. Config file (.signdict/config.yaml)
//! 3. Defaults (~/.signdict)
//!
//! Config file discovery:
//! - Searches current directory and parents for .signdict/config.yaml
//! - Paths in config file are relative to the .signdict/ directory

pub mod paths;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::DEFAULT_BOOKMARKS_KEY;
use crate::storage::StorageBackend;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub storage: Option<StorageConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to .signdict/)
    pub home: Option<String>,
    /// Catalog file (relative to .signdict/) or http(s) URL
    pub catalog: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: Option<StorageBackend>,
    pub bookmarks_key: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to the signdict home (bookmark storage)
    pub home: PathBuf,
    /// Catalog location: filesystem path or URL
    pub catalog: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Storage settings
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub bookmarks_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            bookmarks_key: DEFAULT_BOOKMARKS_KEY.to_string(),
        }
    }
}

impl ResolvedConfig {
    /// JSON storage file ($SIGNDICT_HOME/storage.json)
    pub fn storage_file(&self) -> PathBuf {
        self.home.join("storage.json")
    }

    /// SQLite storage database ($SIGNDICT_HOME/storage.db)
    pub fn storage_db(&self) -> PathBuf {
        self.home.join("storage.db")
    }
}

fn is_url(location: &str) -> bool {
    let lower = location.to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".signdict").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Resolve a catalog location: URLs pass through, paths are resolved
fn resolve_catalog(base: &Path, location: &str) -> String {
    if is_url(location) {
        location.to_string()
    } else {
        resolve_path(base, location).display().to_string()
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".signdict");

    let config_file = find_config_file();

    let (home, catalog, storage) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;
        let config_dir = config_path.parent().unwrap_or(Path::new("."));

        let home = if let Ok(env_home) = std::env::var("SIGNDICT_HOME") {
            PathBuf::from(env_home)
        } else if let Some(ref home_path) = config.paths.home {
            resolve_path(config_dir, home_path)
        } else {
            default_home.clone()
        };

        let catalog = if let Ok(env_catalog) = std::env::var("SIGNDICT_CATALOG") {
            env_catalog
        } else if let Some(ref location) = config.paths.catalog {
            resolve_catalog(config_dir, location)
        } else {
            paths::default_catalog(&home).display().to_string()
        };

        let defaults = StorageSettings::default();
        let storage = match config.storage {
            Some(storage) => StorageSettings {
                backend: storage.backend.unwrap_or(defaults.backend),
                bookmarks_key: storage.bookmarks_key.unwrap_or(defaults.bookmarks_key),
            },
            None => defaults,
        };

        (home, catalog, storage)
    } else {
        let home = std::env::var("SIGNDICT_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home.clone());

        let catalog = std::env::var("SIGNDICT_CATALOG")
            .unwrap_or_else(|_| paths::default_catalog(&home).display().to_string());

        (home, catalog, StorageSettings::default())
    };

    Ok(ResolvedConfig {
        home,
        catalog,
        config_file,
        storage,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

/// Get the signdict home directory.
pub fn signdict_home() -> Result<PathBuf> {
    Ok(config()?.home.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let config_dir = temp.path().join(".signdict");
        std::fs::create_dir_all(&config_dir).unwrap();

        let config_path = config_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
paths:
  home: ./
  catalog: ../catalogs/sample.yaml
storage:
  backend: sqlite
  bookmarks_key: my_bookmarks
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.home, Some("./".to_string()));
        assert_eq!(
            config.paths.catalog,
            Some("../catalogs/sample.yaml".to_string())
        );

        let storage = config.storage.unwrap();
        assert_eq!(storage.backend, Some(StorageBackend::Sqlite));
        assert_eq!(storage.bookmarks_key, Some("my_bookmarks".to_string()));
    }

    #[test]
    fn test_config_file_minimal() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.yaml");
        std::fs::write(&config_path, "version: \"1.0\"\n").unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert!(config.paths.home.is_none());
        assert!(config.storage.is_none());
    }

    #[test]
    fn test_storage_paths() {
        let config = ResolvedConfig {
            home: PathBuf::from("/test/.signdict"),
            catalog: "/test/catalog.yaml".to_string(),
            config_file: None,
            storage: StorageSettings::default(),
        };

        assert_eq!(config.storage_file(), PathBuf::from("/test/.signdict/storage.json"));
        assert_eq!(config.storage_db(), PathBuf::from("/test/.signdict/storage.db"));
        assert_eq!(config.storage.bookmarks_key, DEFAULT_BOOKMARKS_KEY);
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }

    #[test]
    fn test_resolve_catalog_keeps_urls() {
        let base = PathBuf::from("/home/user/project/.signdict");

        assert_eq!(
            resolve_catalog(&base, "https://example.com/catalog.json"),
            "https://example.com/catalog.json"
        );
        assert_eq!(
            resolve_catalog(&base, "/srv/catalog.yaml"),
            "/srv/catalog.yaml"
        );
    }
}
