//! Cleaning rules for extracted URLs
//!
//! Wiki image CDNs embed resize transforms and revision markers in the image
//! path, so the same logical image can surface under many distinct URLs.
//! These rules strip that variance away before the pipeline's dedup and
//! cache logic ever see the URL. Both functions are idempotent.

/// Path segments the image CDN inserts for on-the-fly scaling
///
/// The `-down` variants must come first so their plain prefixes never match
/// inside them.
const SCALE_MARKERS: &[&str] = &[
    "/scale-to-width-down/",
    "/scale-to-height-down/",
    "/scale-to-width/",
    "/scale-to-height/",
];

/// Revision suffix marking a specific upload revision of an image
const REVISION_MARKER: &str = "/revision/latest";

/// Cleans a page (source) URL: strips the query string and fragment
pub fn clean_page_url(url: &str) -> String {
    let url = url.trim();
    let without_fragment = url.split('#').next().unwrap_or(url);
    without_fragment
        .split('?')
        .next()
        .unwrap_or(without_fragment)
        .to_string()
}

/// Cleans an image URL
///
/// 1. Upgrades protocol-relative URLs (`//host/...`) to `https://`
/// 2. Removes scaling-transform path segments (`/scale-to-width-down/200`)
/// 3. Truncates at any `/revision/latest` suffix
/// 4. Strips the query string
pub fn clean_image_url(url: &str) -> String {
    let mut out = url.trim().to_string();

    if out.starts_with("//") {
        out = format!("https:{}", out);
    }

    out = strip_scale_segments(&out);

    if let Some(pos) = out.find(REVISION_MARKER) {
        out.truncate(pos);
    }

    if let Some(pos) = out.find('?') {
        out.truncate(pos);
    }

    out
}

/// Removes `<marker><digits>` path segments for every known scale marker
fn strip_scale_segments(url: &str) -> String {
    let mut out = url.to_string();

    for marker in SCALE_MARKERS {
        while let Some(start) = out.find(marker) {
            let after = start + marker.len();
            let digits = out[after..]
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(out.len() - after);

            // Marker without a numeric argument is not a scale transform
            if digits == 0 {
                break;
            }

            out = format!("{}{}", &out[..start], &out[after + digits..]);
        }
    }

    out
}
