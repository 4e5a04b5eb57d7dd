use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Browser identity sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Speaker-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub http: HttpConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// Endpoints and fixed query parameters of the conference site
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL used to resolve relative links found on detail pages
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Paginated speaker listing
    #[serde(rename = "listing-url")]
    pub listing_url: String,

    /// Prefix of the per-speaker detail pages (`{detail_url}/{slug}`)
    #[serde(rename = "detail-url")]
    pub detail_url: String,

    /// Query parameters sent with every listing request (the page number is added per request)
    #[serde(rename = "listing-params")]
    pub listing_params: BTreeMap<String, String>,

    /// Query parameters sent with every detail request
    #[serde(rename = "detail-params")]
    pub detail_params: BTreeMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.dsei.co.uk".to_string(),
            listing_url: "https://www.dsei.co.uk/forums/overview/speakers".to_string(),
            detail_url: "https://www.dsei.co.uk/speakers".to_string(),
            listing_params: params(&[
                ("sortby", "personSurname asc"),
                ("searchgroup", "A2A12251-speakers"),
            ]),
            detail_params: params(&[
                ("sortby", "personSurname asc"),
                ("searchgroup", "libraryentry-speakers"),
            ]),
        }
    }
}

impl SiteConfig {
    /// Detail page URL for a speaker slug, without query parameters
    pub fn detail_url_for(&self, slug: &str) -> String {
        format!("{}/{}", self.detail_url.trim_end_matches('/'), slug)
    }
}

/// HTTP client behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Total attempts per page, including the first one
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Unit of the exponential backoff between attempts (milliseconds)
    #[serde(rename = "backoff-unit-ms")]
    pub backoff_unit_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            max_attempts: 3,
            backoff_unit_ms: 1000,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff_unit(&self) -> Duration {
        Duration::from_millis(self.backoff_unit_ms)
    }
}

/// Crawl pacing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Fixed delay after every listing page and every detail page (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Hard cap on listing pages visited
    #[serde(rename = "max-pages")]
    pub max_pages: Option<u32>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 1000,
            max_pages: None,
        }
    }
}

impl CrawlerConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV file written after both stages finish
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Optional log file written alongside console output
    #[serde(rename = "log-path")]
    pub log_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "data/speakers.csv".to_string(),
            log_path: None,
        }
    }
}

fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
