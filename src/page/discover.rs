//! Link discovery for expandable pages
//!
//! Turns a classified Hub, List, or Category page into the set of links to
//! re-offer to the frontier, each with a hint for its likely kind. All hrefs
//! are resolved against the page URL here; the frontier only ever sees
//! absolute URLs.

use crate::page::classifier::{
    CATEGORY_MEMBER_SELECTOR, GALLERY_LINK_SELECTOR, LIST_LINK_SELECTORS,
};
use crate::page::{PageDoc, PageKind};
use url::Url;

/// Path keywords marking a gallery link as a character listing
const LIST_KEYWORDS: &[&str] = &["champion", "character", "heroes"];

/// Extracts the links a page contributes back to the frontier
///
/// - Hub pages yield their gallery links; links whose path names a character
///   listing are hinted List, the rest hinted Hub.
/// - List pages yield table/grid links hinted Detail, plus any
///   `Category:Characters` links hinted Category.
/// - Category pages yield member links hinted Detail.
/// - Detail and Unknown pages yield nothing.
pub fn discover_links(doc: &PageDoc, kind: PageKind) -> Vec<(Url, PageKind)> {
    match kind {
        PageKind::Hub => hub_links(doc),
        PageKind::List => list_links(doc),
        PageKind::Category => category_links(doc),
        PageKind::Detail | PageKind::Unknown => Vec::new(),
    }
}

fn hub_links(doc: &PageDoc) -> Vec<(Url, PageKind)> {
    doc.all_attrs(GALLERY_LINK_SELECTOR, "href")
        .iter()
        .filter_map(|href| doc.resolve(href))
        .map(|url| {
            let path = url.path().to_lowercase();
            let hint = if LIST_KEYWORDS.iter().any(|kw| path.contains(kw)) {
                PageKind::List
            } else {
                PageKind::Hub
            };
            (url, hint)
        })
        .collect()
}

fn list_links(doc: &PageDoc) -> Vec<(Url, PageKind)> {
    let mut links: Vec<(Url, PageKind)> = LIST_LINK_SELECTORS
        .iter()
        .flat_map(|sel| doc.all_attrs(sel, "href"))
        .filter_map(|href| doc.resolve(&href))
        .map(|url| (url, PageKind::Detail))
        .collect();

    links.extend(
        doc.all_attrs(r#"a[href*="Category:Characters"]"#, "href")
            .iter()
            .filter_map(|href| doc.resolve(href))
            .map(|url| (url, PageKind::Category)),
    );

    links
}

fn category_links(doc: &PageDoc) -> Vec<(Url, PageKind)> {
    doc.all_attrs(CATEGORY_MEMBER_SELECTOR, "href")
        .iter()
        .filter_map(|href| doc.resolve(href))
        .map(|url| (url, PageKind::Detail))
        .collect()
}
