//! URL handling for fandex
//!
//! Splits into two concerns: seed normalization/validation (what the crawl
//! is allowed to start from) and URL cleaning (the normalization applied to
//! extracted page and image URLs so dedup and caching see one canonical
//! form per logical resource).

mod clean;
mod seed;

pub use clean::{clean_image_url, clean_page_url};
pub use seed::{normalize_seed, wiki_slug};
