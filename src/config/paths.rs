//! Canonical paths for signdict state.
//!
//! Single source of truth - import this instead of hardcoding paths.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use signdict::config::paths;
//!
//! let storage = paths::storage_file()?;
//! let catalog = paths::default_catalog(&paths::signdict_home()?);
//! ```
//!
//! ## Layout
//!
//! ```text
//! ~/.signdict/
//! ├── catalog.yaml        # Default catalog location
//! ├── storage.json        # File backend (all keys, one JSON object)
//! ├── storage.json.lock   # Advisory lock for storage.json writers
//! └── storage.db          # SQLite backend
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;

/// Get the signdict home directory (~/.signdict)
pub fn signdict_home() -> Result<PathBuf> {
    crate::config::signdict_home()
}

/// Get the JSON storage file (~/.signdict/storage.json)
pub fn storage_file() -> Result<PathBuf> {
    Ok(crate::config::config()?.storage_file())
}

/// Get the SQLite storage database (~/.signdict/storage.db)
pub fn storage_db() -> Result<PathBuf> {
    Ok(crate::config::config()?.storage_db())
}

/// Default catalog location inside a home directory
pub fn default_catalog(home: &Path) -> PathBuf {
    home.join("catalog.yaml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_in_home() {
        let home = PathBuf::from("/tmp/.signdict");
        assert_eq!(
            default_catalog(&home),
            PathBuf::from("/tmp/.signdict/catalog.yaml")
        );
    }
}
