use crate::UrlError;
use url::Url;

/// Normalizes and validates a crawl seed URL
///
/// # Normalization Steps
///
/// 1. If the input has no scheme, assume `https://`
/// 2. Parse; reject if malformed
/// 3. Reject schemes other than http/https
/// 4. Reject hosts that are not under the configured allowed domain
///
/// Both HTTP and HTTPS are accepted so tests can point the crawler at a
/// local mock server.
///
/// # Examples
///
/// ```
/// use fandex::url::normalize_seed;
///
/// let url = normalize_seed("leagueoflegends.fandom.com", "fandom.com").unwrap();
/// assert_eq!(url.as_str(), "https://leagueoflegends.fandom.com/");
///
/// assert!(normalize_seed("example.com", "fandom.com").is_err());
/// ```
pub fn normalize_seed(raw: &str, allowed_domain: &str) -> Result<Url, UrlError> {
    let raw = raw.trim();

    // Step 1: default the scheme
    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    // Step 2: parse
    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;

    // Step 3: validate scheme
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    // Step 4: validate host against the allowed domain suffix
    let host = url.host_str().ok_or(UrlError::MissingHost)?;
    if !host_in_domain(host, allowed_domain) {
        return Err(UrlError::WrongDomain {
            host: host.to_string(),
            allowed: allowed_domain.to_string(),
        });
    }

    Ok(url)
}

/// Checks whether a host is the allowed domain or a subdomain of it
fn host_in_domain(host: &str, allowed: &str) -> bool {
    host == allowed || host.ends_with(&format!(".{}", allowed))
}

/// Derives a filesystem-safe slug identifying the wiki
///
/// For a host under the allowed domain, the slug is the subdomain prefix
/// (`leagueoflegends` for `leagueoflegends.fandom.com`). Otherwise the full
/// host is used. Characters outside `[a-z0-9-]` become underscores.
pub fn wiki_slug(url: &Url, allowed_domain: &str) -> String {
    let host = url.host_str().unwrap_or("wiki").to_lowercase();

    let base = match host.strip_suffix(&format!(".{}", allowed_domain)) {
        Some(prefix) if !prefix.is_empty() => prefix.to_string(),
        _ => host,
    };

    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
