//! Catalog sources: where the catalog document comes from.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use super::catalog::Catalog;

/// Trait for catalog origins
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable description of the origin
    fn describe(&self) -> String;

    /// Load and validate the catalog
    async fn load(&self) -> Result<Catalog>;
}

/// Catalog stored in a local JSON or YAML file
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_yaml(&self) -> bool {
        matches!(
            self.path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        )
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Catalog> {
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read catalog: {}", self.path.display()))?;

        let catalog = if self.is_yaml() {
            Catalog::from_yaml(&content)
        } else {
            Catalog::from_json(&content)
        }
        .with_context(|| format!("Invalid catalog: {}", self.path.display()))?;

        tracing::info!(
            path = %self.path.display(),
            entries = catalog.len(),
            categories = catalog.categories().len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }
}

/// Catalog served as JSON over HTTP(S)
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn load(&self) -> Result<Catalog> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch catalog: {}", self.url))?
            .error_for_status()
            .with_context(|| format!("Catalog request rejected: {}", self.url))?;

        let body = response
            .text()
            .await
            .context("Failed to read catalog response")?;

        let catalog = Catalog::from_json(&body)
            .with_context(|| format!("Invalid catalog: {}", self.url))?;

        tracing::info!(url = %self.url, entries = catalog.len(), "Catalog fetched");
        Ok(catalog)
    }
}

/// Pick a source for a location string (URL or filesystem path)
pub fn source_from_location(location: &str) -> Box<dyn CatalogSource> {
    let lower = location.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const YAML: &str = r#"
version: 1
categories:
  - { id: medical, name: "Y tế", icon: stethoscope }
entries:
  - id: bac-si
    gloss: BÁC SĨ
    categoryId: medical
    domain_tags: [y tế]
"#;

    #[tokio::test]
    async fn test_file_source_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.yaml");
        tokio::fs::write(&path, YAML).await.unwrap();

        let catalog = FileSource::new(&path).load().await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].gloss, "BÁC SĨ");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let temp = TempDir::new().unwrap();
        let source = FileSource::new(temp.path().join("nope.json"));

        let err = source.load().await.unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog"));
    }

    #[tokio::test]
    async fn test_file_source_invalid_reference() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");
        tokio::fs::write(
            &path,
            r#"{"categories": [], "entries": [{"id": "v1", "gloss": "A", "categoryId": "x"}]}"#,
        )
        .await
        .unwrap();

        assert!(FileSource::new(&path).load().await.is_err());
    }

    #[test]
    fn test_source_from_location() {
        assert_eq!(
            source_from_location("https://example.com/catalog.json").describe(),
            "https://example.com/catalog.json"
        );
        assert_eq!(
            source_from_location("catalogs/sample.yaml").describe(),
            "catalogs/sample.yaml"
        );
    }
}
