use serde::Deserialize;

/// Main configuration structure for fandex
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub wiki: WikiConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default, rename = "image-cache")]
    pub image_cache: ImageCacheConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Stop after committing this many character records
    #[serde(rename = "record-limit")]
    pub record_limit: usize,

    /// Maximum number of concurrent page fetches
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            record_limit: 50,
            max_concurrent_fetches: 4,
            request_timeout_secs: 30,
        }
    }
}

/// Target wiki configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    /// Domain suffix the seed URL must fall under
    #[serde(rename = "allowed-domain")]
    pub allowed_domain: String,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            allowed_domain: "fandom.com".to_string(),
        }
    }
}

/// Page classifier tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Minimum number of independent detail-page signals required before a
    /// page is treated as a character detail page
    #[serde(rename = "evidence-threshold")]
    pub evidence_threshold: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            evidence_threshold: 2,
        }
    }
}

/// Image validation cache tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageCacheConfig {
    /// Maximum number of cached image verdicts (LRU beyond this)
    pub capacity: usize,

    /// Seconds before a cached verdict expires
    #[serde(rename = "ttl-secs")]
    pub ttl_secs: u64,
}

impl Default for ImageCacheConfig {
    fn default() -> Self {
        // Mirrors the defaults the image pipeline was tuned with
        Self {
            capacity: 1000,
            ttl_secs: 3600,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "fandex".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/fandex/fandex".to_string(),
            contact_email: "fandex@example.com".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory where character snapshots are written
    #[serde(rename = "data-dir")]
    pub data_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the full user-agent header string
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}
