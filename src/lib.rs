//! Fandex: a wiki character harvester
//!
//! This crate crawls a Fandom-style wiki, discovering character detail pages
//! through hub, list, and category pages, and extracts structured character
//! records into a deduplicated JSON snapshot.

pub mod config;
pub mod crawl;
pub mod fetch;
pub mod output;
pub mod page;
pub mod pipeline;
pub mod record;
pub mod url;

use thiserror::Error;

/// Main error type for fandex operations
///
/// Only crawl-fatal conditions live here. Per-page failures (fetch errors,
/// extraction misses, pipeline rejections) are absorbed where they occur and
/// never abort the crawl.
#[derive(Debug, Error)]
pub enum FandexError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL {url}: {reason}")]
    InvalidSeedUrl { url: String, reason: String },

    #[error("Snapshot write failed for {path}: {source}")]
    Persistence {
        path: String,
        source: std::io::Error,
    },

    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("Host {host} is not under allowed domain {allowed}")]
    WrongDomain { host: String, allowed: String },
}

/// Result type alias for fandex operations
pub type Result<T> = std::result::Result<T, FandexError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawl::{run_crawl, Coordinator};
pub use output::CrawlReport;
pub use page::PageKind;
pub use record::CharacterRecord;
