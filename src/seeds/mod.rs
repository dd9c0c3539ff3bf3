//! Seed page sources
//!
//! An audit starts from an ordered list of seed pages, given directly, as a
//! pasted list, or through a sitemap feed.

mod sitemap;

pub use sitemap::{fetch_sitemap_urls, parse_sitemap, SITEMAP_NS};

use crate::config::Config;
use reqwest::Client;

/// Where the seed pages of an audit come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    /// One page URL
    Single(String),

    /// Newline-delimited page URLs
    List(String),

    /// URL of a sitemap feed
    Sitemap(String),
}

impl SeedSource {
    /// Short label used in logs and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Single(_) => "single URL",
            Self::List(_) => "URL list",
            Self::Sitemap(_) => "sitemap",
        }
    }
}

/// Splits a pasted list into trimmed, non-blank lines
pub fn parse_url_list(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Materializes the seed pages of a source, preserving order
///
/// Sitemap feeds are fetched with the configured sitemap identity and
/// redirect limit. Never fails: a sitemap that cannot be fetched or parsed is
/// logged and yields no seeds, which the caller reports as "nothing to audit".
pub async fn resolve_seeds(source: &SeedSource, client: &Client, config: &Config) -> Vec<String> {
    match source {
        SeedSource::Single(url) => {
            let url = url.trim();
            if url.is_empty() {
                Vec::new()
            } else {
                vec![url.to_string()]
            }
        }
        SeedSource::List(text) => parse_url_list(text),
        SeedSource::Sitemap(url) => {
            let url = url.trim();
            if url.is_empty() {
                return Vec::new();
            }
            let agent = &config.user_agent.sitemap;
            match fetch_sitemap_urls(client, url, agent, config.crawler.max_redirects).await {
                Ok(urls) => urls,
                Err(e) => {
                    tracing::error!("Sitemap error: {}", e);
                    Vec::new()
                }
            }
        }
    }
}
