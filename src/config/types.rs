use serde::Deserialize;

/// Main configuration structure for Tagsift
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub proxy: ProxyPoolConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Fetch and pagination behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Base hashtag listing URL; the encoded hashtag is appended directly
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Maximum number of listing pages to walk per run
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Pacing delay between successive page fetches (seconds)
    #[serde(
        rename = "sleep-between-requests",
        default = "default_sleep_between_requests"
    )]
    pub sleep_between_requests: f64,

    /// Maximum GET attempts per page
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Linear backoff factor between attempts (seconds per attempt number)
    #[serde(rename = "backoff-factor", default = "default_backoff_factor")]
    pub backoff_factor: f64,
}

/// User-agent pool configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityConfig {
    /// User-agent strings rotated across fetch attempts; empty means a
    /// single built-in identity
    #[serde(rename = "user-agents", default)]
    pub user_agents: Vec<String>,
}

/// Proxy pool configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyPoolConfig {
    /// Proxy endpoint URLs rotated across fetch attempts; each endpoint is
    /// used for both HTTP and HTTPS. Empty means direct connection.
    #[serde(default)]
    pub endpoints: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the CLI writes the scraped posts to, as JSON
    #[serde(rename = "results-path", default = "default_results_path")]
    pub results_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: default_results_path(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.facebook.com/hashtag/".to_string()
}

fn default_max_pages() -> u32 {
    5
}

fn default_request_timeout() -> u64 {
    15
}

fn default_sleep_between_requests() -> f64 {
    1.5
}

fn default_max_retries() -> u32 {
    3
}

fn default_backoff_factor() -> f64 {
    1.5
}

fn default_results_path() -> String {
    "./posts.json".to_string()
}
