//! Configuration module for link-audit
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing values fall back to the defaults of the
//! interactive tool (slow mode on, 200ms pause, 10s timeout).
//!
//! # Example
//!
//! ```no_run
//! use link_audit::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("audit.toml")).unwrap();
//! println!("Request timeout: {}s", config.crawler.request_timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlPolicy, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_PAGE_USER_AGENT,
    DEFAULT_SITEMAP_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
