//! Page classifier
//!
//! Tags each fetched page as Hub, List, Category, Detail, or Unknown. No
//! single structural cue reliably separates a detail page from a list page
//! across wiki skins, so detail detection combines several weak signals into
//! an evidence score checked against a configurable threshold.

use crate::config::ClassifierConfig;
use crate::page::PageDoc;

/// Infobox containers that mark a character detail page
const INFOBOX_SELECTORS: &[&str] = &["aside.portable-infobox", ".portable-infobox"];

/// Attribute labels commonly present in character infoboxes
const ATTRIBUTE_LABELS: &[&str] = &["Status", "Species", "Gender", "Occupation", "Affiliation"];

/// URL path keywords that often indicate character pages
///
/// Substring match, so `character` also covers `characters/` and `hero`
/// covers `heroes`.
const URL_KEYWORDS: &[&str] = &["character", "champion", "hero"];

/// Selectors whose matches identify a character list page
pub(crate) const LIST_LINK_SELECTORS: &[&str] = &[
    "div.article-table a",
    "table.sortable a",
    "div.character-grid a",
];

/// Selector for category member links
pub(crate) const CATEGORY_MEMBER_SELECTOR: &str = "div.category-page__members a";

/// Selector for hub gallery links
pub(crate) const GALLERY_LINK_SELECTOR: &str = "div.wikia-gallery-item a.link-internal";

/// The role a fetched page plays in discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Landing page with gallery links to site sections
    Hub,

    /// Table/grid listing of character links
    List,

    /// Category page whose members are character pages
    Category,

    /// A character detail page to extract a record from
    Detail,

    /// Anything else; never expanded further
    Unknown,
}

impl PageKind {
    /// Returns true if this kind's links feed back into the frontier
    pub fn is_expandable(&self) -> bool {
        matches!(self, Self::Hub | Self::List | Self::Category)
    }
}

impl std::fmt::Display for PageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Hub => "hub",
            Self::List => "list",
            Self::Category => "category",
            Self::Detail => "detail",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Computes the detail-page evidence score
///
/// Each named predicate contributes at most one point, independently:
/// 1. an infobox-like container is present
/// 2. a known attribute label appears in the infobox label text
/// 3. the URL path contains a character keyword
pub fn detail_evidence(doc: &PageDoc) -> u32 {
    let checks = [
        has_infobox(doc),
        has_attribute_labels(doc),
        url_has_keyword(doc),
    ];

    checks.iter().filter(|&&hit| hit).count() as u32
}

fn has_infobox(doc: &PageDoc) -> bool {
    INFOBOX_SELECTORS.iter().any(|sel| doc.exists(sel))
}

fn has_attribute_labels(doc: &PageDoc) -> bool {
    let labels = doc.texts(".pi-data-label");
    labels
        .iter()
        .any(|text| ATTRIBUTE_LABELS.iter().any(|known| text.contains(known)))
}

fn url_has_keyword(doc: &PageDoc) -> bool {
    let path = doc.url().path().to_lowercase();
    URL_KEYWORDS.iter().any(|kw| path.contains(kw))
}

/// Classifies a fetched page
///
/// The detail evidence score is checked first; the hint carried from link
/// discovery never overrides it, so a hinted-Detail page with too little
/// evidence falls through to Unknown and is discarded. Structural cues
/// decide the remaining kinds, with the hint as the final fallback.
pub fn classify(doc: &PageDoc, hint: Option<PageKind>, config: &ClassifierConfig) -> PageKind {
    if detail_evidence(doc) >= config.evidence_threshold {
        return PageKind::Detail;
    }

    if LIST_LINK_SELECTORS.iter().any(|sel| doc.exists(sel)) {
        return PageKind::List;
    }

    if doc.exists(CATEGORY_MEMBER_SELECTOR) {
        return PageKind::Category;
    }

    if doc.exists(GALLERY_LINK_SELECTOR) {
        return PageKind::Hub;
    }

    match hint {
        Some(kind) if kind != PageKind::Detail => kind,
        _ => PageKind::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn doc_at(body: &str, url: &str) -> PageDoc {
        PageDoc::parse(body, Url::parse(url).unwrap())
    }

    fn config() -> ClassifierConfig {
        ClassifierConfig::default()
    }

    const DETAIL_BODY: &str = r#"<html><body>
        <h1 class="page-header__title">Ahri</h1>
        <aside class="portable-infobox">
            <div class="pi-item">
                <h3 class="pi-data-label">Species</h3>
                <div class="pi-data-value">Vastaya</div>
            </div>
        </aside>
    </body></html>"#;

    #[test]
    fn test_detail_two_signals() {
        // Infobox + attribute label, plain URL
        let d = doc_at(DETAIL_BODY, "https://w.fandom.com/wiki/Ahri");
        assert_eq!(detail_evidence(&d), 2);
        assert_eq!(classify(&d, None, &config()), PageKind::Detail);
    }

    #[test]
    fn test_detail_all_three_signals() {
        let d = doc_at(DETAIL_BODY, "https://w.fandom.com/wiki/characters/Ahri");
        assert_eq!(detail_evidence(&d), 3);
    }

    #[test]
    fn test_single_signal_not_detail() {
        // Keyword URL alone must not classify as detail
        let d = doc_at("<html><body></body></html>", "https://w.fandom.com/wiki/champions");
        assert_eq!(detail_evidence(&d), 1);
        assert_ne!(classify(&d, None, &config()), PageKind::Detail);
    }

    #[test]
    fn test_threshold_is_tunable() {
        let d = doc_at("<html><body></body></html>", "https://w.fandom.com/wiki/champions");
        let lenient = ClassifierConfig {
            evidence_threshold: 1,
        };
        assert_eq!(classify(&d, None, &lenient), PageKind::Detail);
    }

    #[test]
    fn test_list_by_article_table() {
        let body = r#"<html><body><div class="article-table">
            <a href="/wiki/Ahri">Ahri</a><a href="/wiki/Garen">Garen</a>
        </div></body></html>"#;
        let d = doc_at(body, "https://w.fandom.com/wiki/Champions_list");
        assert_eq!(classify(&d, None, &config()), PageKind::List);
    }

    #[test]
    fn test_category_by_member_markup() {
        let body = r#"<html><body><div class="category-page__members">
            <a href="/wiki/Ahri">Ahri</a>
        </div></body></html>"#;
        let d = doc_at(body, "https://w.fandom.com/wiki/Category:Characters");
        assert_eq!(classify(&d, None, &config()), PageKind::Category);
    }

    #[test]
    fn test_hub_by_gallery_links() {
        let body = r#"<html><body><div class="wikia-gallery-item">
            <a class="link-internal" href="/wiki/Champions">Champions</a>
        </div></body></html>"#;
        let d = doc_at(body, "https://w.fandom.com/wiki/Main");
        assert_eq!(classify(&d, None, &config()), PageKind::Hub);
    }

    #[test]
    fn test_unknown_without_cues() {
        let d = doc_at("<html><body><p>Lore text</p></body></html>", "https://w.fandom.com/wiki/Lore");
        assert_eq!(classify(&d, None, &config()), PageKind::Unknown);
    }

    #[test]
    fn test_hint_used_as_fallback() {
        let d = doc_at("<html><body><p>Sparse</p></body></html>", "https://w.fandom.com/wiki/Page");
        assert_eq!(classify(&d, Some(PageKind::Hub), &config()), PageKind::Hub);
    }

    #[test]
    fn test_detail_hint_does_not_force_detail() {
        // Hinted Detail but no evidence: discard, never extract
        let d = doc_at("<html><body><p>Sparse</p></body></html>", "https://w.fandom.com/wiki/Page");
        assert_eq!(
            classify(&d, Some(PageKind::Detail), &config()),
            PageKind::Unknown
        );
    }

    #[test]
    fn test_evidence_beats_structural_cues() {
        // A page with both an infobox and a table still counts as detail
        let body = r#"<html><body>
            <aside class="portable-infobox">
                <h3 class="pi-data-label">Status</h3>
            </aside>
            <div class="article-table"><a href="/wiki/Other">Other</a></div>
        </body></html>"#;
        let d = doc_at(body, "https://w.fandom.com/wiki/character/Ahri");
        assert_eq!(classify(&d, None, &config()), PageKind::Detail);
    }
}
