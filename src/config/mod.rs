//! Configuration module for fandex
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every section is optional; omitted sections fall back to the
//! built-in defaults, so a crawl can run with no config file at all.
//!
//! # Example
//!
//! ```no_run
//! use fandex::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("fandex.toml")).unwrap();
//! println!("Record limit: {}", config.crawler.record_limit);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ClassifierConfig, Config, CrawlerConfig, ImageCacheConfig, OutputConfig, UserAgentConfig,
    WikiConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

// Re-export validation entry point
pub use validation::validate;
