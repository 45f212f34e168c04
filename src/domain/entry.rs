//! Catalog entries (one sign video each).
//!
//! Field names on the wire follow the dictionary's data files
//! (`description_vi`, `categoryId`, `videoUrl`, ...). The snake_case
//! names are accepted as aliases so hand-written catalogs stay readable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::CategoryId;

/// Entry identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Difficulty level of a sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Basic,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Basic => write!(f, "basic"),
            Level::Intermediate => write!(f, "intermediate"),
            Level::Advanced => write!(f, "advanced"),
        }
    }
}

impl std::str::FromStr for Level {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Level::Basic),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            _ => anyhow::bail!("Unknown level: {}", s),
        }
    }
}

/// The person performing the sign in the video
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Example sentence with the sign sequence used to express it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    #[serde(rename = "text_vi", alias = "text")]
    pub text: String,

    #[serde(default)]
    pub sign_sequence: Vec<String>,
}

/// A single dictionary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique entry identifier
    pub id: EntryId,

    /// Standardized term, e.g. "BÁC SĨ"
    pub gloss: String,

    /// Alternative names, e.g. ["DOCTOR", "PHYSICIAN"]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,

    /// Free-text explanation of the sign
    #[serde(rename = "description_vi", alias = "description", default)]
    pub description: String,

    /// Owning category
    #[serde(rename = "categoryId", alias = "category_id")]
    pub category_id: CategoryId,

    /// Domain tags used for filtering. Treated as a set; order is kept
    /// only for display.
    #[serde(rename = "domain_tags", alias = "tags", default)]
    pub domain_tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,

    /// Video location (direct file or YouTube link)
    #[serde(rename = "videoUrl", alias = "media_url", default)]
    pub media_url: String,

    #[serde(default)]
    pub signer: Signer,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<u32>,

    /// Region code, e.g. "VN"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Organization that verified the sign
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,

    /// License tag, e.g. "cc-by-sa"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Regional variants, pronunciation notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entry {
    /// Create a new entry with empty metadata
    pub fn new(
        id: impl Into<String>,
        gloss: impl Into<String>,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::new(id),
            gloss: gloss.into(),
            variants: Vec::new(),
            description: String::new(),
            category_id: CategoryId::new(category_id),
            domain_tags: Vec::new(),
            level: None,
            media_url: String::new(),
            signer: Signer::default(),
            examples: Vec::new(),
            thumbnail: None,
            duration_sec: None,
            region: None,
            created_at: None,
            verified_by: None,
            license: None,
            notes: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a variant name
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variants.push(variant.into());
        self
    }

    /// Add a domain tag (duplicates are ignored)
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.domain_tags.contains(&tag) {
            self.domain_tags.push(tag);
        }
        self
    }

    /// Add multiple domain tags
    pub fn with_tags(self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        tags.into_iter().fold(self, |entry, tag| entry.with_tag(tag))
    }

    /// Set the media URL
    pub fn with_media_url(mut self, url: impl Into<String>) -> Self {
        self.media_url = url.into();
        self
    }

    /// Set the difficulty level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Check whether the entry carries a domain tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.domain_tags.iter().any(|t| t == tag)
    }

    /// Media URL in the form the player embeds
    pub fn embed_url(&self) -> String {
        super::media::embed_url(&self.media_url)
    }
}
