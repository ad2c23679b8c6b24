//! Character record model
//!
//! The unit of crawl output. A record is created by the field extractor as a
//! raw candidate, mutated only by pipeline stages, and becomes immutable once
//! committed to the snapshot.

use serde::{Deserialize, Serialize};

/// A structured character record extracted from a wiki detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    /// Character name (non-empty after validation)
    pub name: String,

    /// Canonical page URL (absolute http/https after validation)
    pub source_url: String,

    /// Portrait/render image URL, present only after passing image validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Species or race, when the infobox states one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Role or occupation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Gameplay or narrative class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// Origin or region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl CharacterRecord {
    /// Creates a record with only the required identity fields set
    pub fn new(name: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_url: source_url.into(),
            image_url: None,
            kind: None,
            role: None,
            class: None,
            origin: None,
        }
    }

    /// Composite key uniquely identifying a record across the run
    pub fn dedup_key(&self) -> String {
        format!("{}::{}", self.name, self.source_url)
    }
}
