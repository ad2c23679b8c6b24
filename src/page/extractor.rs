//! Character field extractor
//!
//! Produces zero or one raw candidate record from a Detail-classified page.
//! A detail page without an extractable name yields nothing, whatever its
//! other signals. Candidates leave here uncleaned; normalization is the
//! pipeline's job.

use crate::page::PageDoc;
use crate::record::CharacterRecord;

/// Heading selectors tried in order for the character name
const NAME_SELECTORS: &[&str] = &["h1.page-header__title", "h1"];

/// Generic image containers, tried after the alt-text strategies
const IMAGE_FALLBACK_SELECTORS: &[&str] = &[
    "figure.pi-image img",
    ".infobox-image img",
    ".champion-image img",
    ".character-image img",
    "aside.portable-infobox img",
];

/// Extracts a raw candidate record from a detail page
///
/// Returns None when no non-empty name is found.
pub fn extract_candidate(doc: &PageDoc) -> Option<CharacterRecord> {
    let name = doc.first_text(NAME_SELECTORS)?;

    let mut record = CharacterRecord::new(name, doc.url().as_str());
    record.image_url = extract_image_url(doc, &record.name);
    extract_taxonomy(doc, &mut record);

    Some(record)
}

/// Tries image selector strategies from most specific to most generic
///
/// The specific strategies match alt text containing the character's base
/// name (name truncated at the first parenthesis) plus "Render" or
/// "Portrait"; the fallbacks grab whatever the infobox shows.
fn extract_image_url(doc: &PageDoc, name: &str) -> Option<String> {
    let base_name = name.split('(').next().unwrap_or(name).trim();

    if !base_name.is_empty() && !base_name.contains('"') {
        for suffix in ["Render", "Portrait"] {
            let selector = format!(r#"img[alt*="{} {}"]"#, base_name, suffix);
            if let Some(src) = doc.first_attr(&selector, "src") {
                return Some(src);
            }
        }
    }

    IMAGE_FALLBACK_SELECTORS
        .iter()
        .find_map(|sel| doc.first_attr(sel, "src"))
}

/// Populates optional taxonomy fields from infobox label/value pairs
fn extract_taxonomy(doc: &PageDoc, record: &mut CharacterRecord) {
    use scraper::Selector;

    let (Ok(label_sel), Ok(value_sel)) = (
        Selector::parse(".pi-data-label"),
        Selector::parse(".pi-data-value"),
    ) else {
        return;
    };

    for item in doc.elements(".pi-item") {
        let label = item
            .select(&label_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string());
        let value = item
            .select(&value_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|v| !v.is_empty());

        let (Some(label), Some(value)) = (label, value) else {
            continue;
        };

        let slot = match label.as_str() {
            "Species" => &mut record.kind,
            "Role" | "Occupation" => &mut record.role,
            "Class" => &mut record.class,
            "Origin" | "Region" => &mut record.origin,
            _ => continue,
        };

        if slot.is_none() {
            *slot = Some(value);
        }
    }
}
