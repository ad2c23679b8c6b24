//! Fetched-page handling
//!
//! This module wraps the parsed HTML document and hosts the page classifier,
//! link discovery, and the character field extractor. Everything here is
//! CPU-bound and synchronous; network I/O lives in [`crate::fetch`].

mod classifier;
mod discover;
mod extractor;

pub use classifier::{classify, detail_evidence, PageKind};
pub use discover::discover_links;
pub use extractor::extract_candidate;

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A fetched page parsed into a queryable document
///
/// Thin wrapper over `scraper::Html` carrying the page URL, with the handful
/// of selector helpers the classifier and extractor need.
pub struct PageDoc {
    url: Url,
    html: Html,
}

impl PageDoc {
    /// Parses an HTML body fetched from `url`
    pub fn parse(body: &str, url: Url) -> Self {
        Self {
            url,
            html: Html::parse_document(body),
        }
    }

    /// The URL this document was fetched from
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns true if any element matches the selector
    pub fn exists(&self, selector: &str) -> bool {
        match Selector::parse(selector) {
            Ok(sel) => self.html.select(&sel).next().is_some(),
            Err(_) => false,
        }
    }

    /// Trimmed text content of every element matching the selector
    pub fn texts(&self, selector: &str) -> Vec<String> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.html
            .select(&sel)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// First non-empty trimmed text among the given selectors, in order
    pub fn first_text(&self, selectors: &[&str]) -> Option<String> {
        selectors
            .iter()
            .flat_map(|s| self.texts(s).into_iter().next())
            .next()
    }

    /// First value of `attr` among elements matching the selector
    pub fn first_attr(&self, selector: &str, attr: &str) -> Option<String> {
        let sel = Selector::parse(selector).ok()?;
        self.html
            .select(&sel)
            .filter_map(|el| el.value().attr(attr))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
    }

    /// All values of `attr` among elements matching the selector
    pub fn all_attrs(&self, selector: &str, attr: &str) -> Vec<String> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.html
            .select(&sel)
            .filter_map(|el| el.value().attr(attr))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// Elements matching the selector, for scoped sub-queries
    pub fn elements(&self, selector: &str) -> Vec<ElementRef<'_>> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.html.select(&sel).collect()
    }

    /// Resolves an href against this page's URL
    ///
    /// Returns None for empty hrefs, fragment-only anchors, special schemes
    /// (`javascript:`, `mailto:`, `tel:`, `data:`), and anything that does
    /// not resolve to an http(s) URL.
    pub fn resolve(&self, href: &str) -> Option<Url> {
        let href = href.trim();

        if href.is_empty() || href.starts_with('#') {
            return None;
        }

        if href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
            || href.starts_with("data:")
        {
            return None;
        }

        match self.url.join(href) {
            Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
                Some(absolute)
            }
            _ => None,
        }
    }
}
