use serde::Deserialize;
use std::time::Duration;

/// Default identity sent with page fetches and link checks
pub const DEFAULT_PAGE_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Default identity sent with sitemap fetches
pub const DEFAULT_SITEMAP_USER_AGENT: &str = "Mozilla/5.0";

/// Main configuration structure for link-audit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Pause after every link check
    #[serde(rename = "slow-mode")]
    pub slow_mode: bool,

    /// Length of the pause in slow mode (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Timeout applied to every request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Maximum number of redirect hops followed per request
    #[serde(rename = "max-redirects")]
    pub max_redirects: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            slow_mode: true,
            delay_ms: 200,
            request_timeout_secs: 10,
            max_redirects: 30,
        }
    }
}

impl CrawlerConfig {
    /// Returns the pacing policy described by this configuration
    pub fn policy(&self) -> CrawlPolicy {
        CrawlPolicy {
            delay_enabled: self.slow_mode,
            delay: Duration::from_millis(self.delay_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Identity strings sent in the `User-Agent` header
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Sent with page fetches and link checks
    pub page: String,

    /// Sent with sitemap fetches
    pub sitemap: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_USER_AGENT.to_string(),
            sitemap: DEFAULT_SITEMAP_USER_AGENT.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to export the findings as CSV
    #[serde(rename = "csv-path")]
    pub csv_path: Option<String>,

    /// Where to write the markdown summary
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}

/// Pacing policy read by the audit loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlPolicy {
    /// Whether to pause after each link check
    pub delay_enabled: bool,

    /// Pause length when enabled
    pub delay: Duration,
}

impl Default for CrawlPolicy {
    fn default() -> Self {
        CrawlerConfig::default().policy()
    }
}

impl CrawlPolicy {
    /// A policy that never pauses
    pub fn no_delay() -> Self {
        Self {
            delay_enabled: false,
            delay: Duration::ZERO,
        }
    }
}
