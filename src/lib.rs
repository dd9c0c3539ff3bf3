//! link-audit: an in-content link auditor
//!
//! This crate audits the outbound links found in the main content of a set of
//! seed pages. Every link is requested once, its redirect chain is followed, and
//! any link that does not answer with a direct `200 OK` is reported as a
//! [`Finding`].

pub mod config;
pub mod crawler;
pub mod output;
pub mod report;
pub mod seeds;
pub mod url;

use thiserror::Error;

/// Main error type for link-audit operations
///
/// The audit loop itself never returns this error: page and link failures are
/// contained inside the report. It covers setup and export paths only.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised while resolving a sitemap feed
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Sitemap {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Redirect error for sitemap {url}: {source}")]
    Redirect {
        url: String,
        source: LinkCheckError,
    },

    #[error("Invalid sitemap URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Malformed sitemap XML: {0}")]
    Xml(String),
}

/// Errors raised while fetching a seed page
///
/// Any of these makes the orchestrator skip the page. An error status is not
/// one of them: the page body is still audited.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Redirect error for {url}: {source}")]
    Redirect {
        url: String,
        source: LinkCheckError,
    },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

/// Errors raised while following a link's redirect chain
///
/// Any of these is recorded as an error finding.
#[derive(Debug, Error)]
pub enum LinkCheckError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Too many redirects (limit {limit})")]
    TooManyRedirects { limit: u32 },

    #[error("Redirect loop detected at {url}")]
    RedirectLoop { url: String },

    #[error("Invalid redirect location '{location}'")]
    InvalidLocation { location: String },
}

/// Result type alias for link-audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, CrawlPolicy};
pub use crawler::{AuditProgress, Auditor};
pub use report::{AuditReport, Destination, Finding, LinkStatus};
pub use seeds::SeedSource;
