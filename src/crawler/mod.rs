//! Crawler module for page fetching and link checking
//!
//! This module contains the core audit logic, including:
//! - HTTP fetching with manual redirect handling
//! - Main-content link extraction
//! - Link status resolution (initial status, final destination)
//! - Pacing between link checks
//! - Overall audit coordination

mod coordinator;
mod fetcher;
mod pacing;
mod parser;
mod redirect;

pub use coordinator::{run_audit, AuditProgress, Auditor};
pub use fetcher::{
    build_http_client, fetch_page, follow_redirects, FetchedPage, RedirectChain, RedirectHop,
};
pub use pacing::{limiter_for, FixedDelay, NoDelay, RateLimiter};
pub use parser::{extract_anchors, Anchor};
pub use redirect::{resolve_link, LinkCheck};
