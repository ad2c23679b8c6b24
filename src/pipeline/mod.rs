//! Item pipeline
//!
//! Every raw candidate extracted from a detail page passes through four
//! stages in a fixed order: validation, cleaning, image validation, and
//! deduplication. Cleaning runs before image validation and dedup because
//! both operate on normalized values. A stage either rejects with a reason
//! or passes the (possibly mutated) candidate along; rejections are local
//! and never abort the crawl.

mod cache;

pub use cache::ImageValidationCache;

use crate::config::ImageCacheConfig;
use crate::record::CharacterRecord;
use crate::url::{clean_image_url, clean_page_url};
use std::collections::HashSet;
use std::time::Duration;

/// Image file extensions accepted without a path marker
const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif"];

/// Path markers accepted when the URL carries no recognized extension
const IMAGE_PATH_MARKERS: &[&str] = &["/render", "/portrait", "/image"];

/// Why a candidate was dropped, logged as a reason code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// Name or source URL missing/empty
    MissingField,
    /// Source URL is not http/https
    InvalidSourceUrl,
    /// Candidate has no image URL at all
    NoImage,
    /// Image URL is not http/https
    BadImageUrl,
    /// Image URL has neither a known extension nor a known path marker
    UnrecognizedImage,
    /// Image URL was previously judged invalid (cache hit, false)
    CachedInvalid,
    /// A record with the same name::sourceUrl key was already committed
    Duplicate,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::MissingField => "missing-field",
            Self::InvalidSourceUrl => "invalid-source-url",
            Self::NoImage => "no-image",
            Self::BadImageUrl => "bad-image-url",
            Self::UnrecognizedImage => "unrecognized-image",
            Self::CachedInvalid => "cached-invalid",
            Self::Duplicate => "duplicate",
        };
        write!(f, "{}", s)
    }
}

/// The staged item pipeline with its two shared indices
pub struct Pipeline {
    cache: ImageValidationCache,
    dedup: HashSet<String>,
    validations_performed: u64,
}

impl Pipeline {
    /// Creates a pipeline with an image cache sized per the config
    pub fn new(cache_config: &ImageCacheConfig) -> Self {
        Self {
            cache: ImageValidationCache::new(
                cache_config.capacity,
                Duration::from_secs(cache_config.ttl_secs),
            ),
            dedup: HashSet::new(),
            validations_performed: 0,
        }
    }

    /// Runs a candidate through all stages in order
    ///
    /// A candidate that exits here is ready to commit.
    pub fn process(
        &mut self,
        candidate: CharacterRecord,
    ) -> Result<CharacterRecord, RejectReason> {
        let result = self.run_stages(candidate);

        if let Err(reason) = &result {
            tracing::debug!("Candidate rejected: {}", reason);
        }

        result
    }

    fn run_stages(
        &mut self,
        candidate: CharacterRecord,
    ) -> Result<CharacterRecord, RejectReason> {
        validate(&candidate)?;
        let candidate = clean(candidate);
        self.check_image(&candidate)?;
        self.dedup(&candidate)?;
        Ok(candidate)
    }

    /// Stage 3: image acceptance check with caching
    ///
    /// Cheap shape checks run inline; the format verdict for a URL not seen
    /// before is computed once and cached, so a second pass over the same
    /// URL does no re-validation work.
    fn check_image(&mut self, candidate: &CharacterRecord) -> Result<(), RejectReason> {
        let url = candidate.image_url.as_deref().ok_or(RejectReason::NoImage)?;

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(RejectReason::BadImageUrl);
        }

        match self.cache.get(url) {
            Some(true) => Ok(()),
            Some(false) => Err(RejectReason::CachedInvalid),
            None => {
                let accepted = self.validate_image_format(url);
                self.cache.insert(url, accepted);
                if accepted {
                    Ok(())
                } else {
                    Err(RejectReason::UnrecognizedImage)
                }
            }
        }
    }

    /// The instrumented validation step, run only on cache misses
    fn validate_image_format(&mut self, url: &str) -> bool {
        self.validations_performed += 1;
        let lower = url.to_lowercase();

        IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
            || IMAGE_PATH_MARKERS.iter().any(|m| lower.contains(m))
    }

    /// Stage 4: dedup on the `name::sourceUrl` composite key
    ///
    /// Check-and-insert is a single operation on the index; no two committed
    /// records ever share a key.
    fn dedup(&mut self, candidate: &CharacterRecord) -> Result<(), RejectReason> {
        if self.dedup.insert(candidate.dedup_key()) {
            Ok(())
        } else {
            Err(RejectReason::Duplicate)
        }
    }

    /// Number of image-format validations actually performed (cache misses)
    pub fn validations_performed(&self) -> u64 {
        self.validations_performed
    }

    /// Number of cached image verdicts currently held
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

/// Stage 1: validation, no mutation
fn validate(candidate: &CharacterRecord) -> Result<(), RejectReason> {
    if candidate.name.trim().is_empty() || candidate.source_url.is_empty() {
        return Err(RejectReason::MissingField);
    }

    if !candidate.source_url.starts_with("http://")
        && !candidate.source_url.starts_with("https://")
    {
        return Err(RejectReason::InvalidSourceUrl);
    }

    Ok(())
}

/// Stage 2: cleaning, never rejects
///
/// Trims the name, strips a trailing parenthetical suffix like
/// "(Character)", strips the query string from the source URL, and applies
/// the image-URL cleaning rules.
fn clean(mut candidate: CharacterRecord) -> CharacterRecord {
    candidate.name = strip_parenthetical_suffix(candidate.name.trim()).to_string();
    candidate.source_url = clean_page_url(&candidate.source_url);
    candidate.image_url = candidate.image_url.as_deref().map(clean_image_url);
    candidate
}

/// Removes a trailing " (...)" suffix from a character name
fn strip_parenthetical_suffix(name: &str) -> &str {
    if name.ends_with(')') {
        if let Some(open) = name.rfind('(') {
            return name[..open].trim_end();
        }
    }
    name
}
