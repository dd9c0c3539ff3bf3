//! Audit coordinator - main audit orchestration logic
//!
//! This module drives an audit from seed source to report:
//! - Resolving the seed pages
//! - Fetching each page and extracting its in-content links
//! - Checking every link and collecting findings
//! - Pacing link checks and reporting progress
//!
//! Failures never escape the loop. A page that cannot be fetched is skipped; a
//! link that cannot be checked becomes an error finding. A page served with an
//! error status is still audited, since error pages can carry content links.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::pacing::{limiter_for, RateLimiter};
use crate::crawler::parser::{extract_anchors, Anchor};
use crate::crawler::redirect::{resolve_link, LinkCheck};
use crate::report::{AuditOutcome, AuditReport};
use crate::seeds::{resolve_seeds, SeedSource};
use crate::url::parse_page_url;
use crate::AuditError;
use reqwest::Client;
use tokio_util::sync::CancellationToken;

/// Progress notification sent after each seed page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditProgress {
    /// Seed pages processed so far
    pub completed: usize,

    /// Total seed pages
    pub total: usize,

    /// The page just processed
    pub page_url: String,
}

impl AuditProgress {
    /// Fraction complete, in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Whether the loop should keep going after a page
enum Flow {
    Continue,
    Cancelled,
}

/// Main audit coordinator
pub struct Auditor {
    config: Config,
    client: Client,
    limiter: Box<dyn RateLimiter>,
    cancel: CancellationToken,
}

impl Auditor {
    /// Creates an auditor with the configured client and pacing policy
    ///
    /// # Returns
    ///
    /// * `Ok(Auditor)` - Ready to run
    /// * `Err(AuditError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, AuditError> {
        let client = build_http_client(&config)?;
        let limiter = limiter_for(&config.crawler.policy());

        Ok(Self {
            config,
            client,
            limiter,
            cancel: CancellationToken::new(),
        })
    }

    /// Replaces the pacing strategy
    pub fn with_rate_limiter(mut self, limiter: Box<dyn RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    /// Uses an external token to cancel the audit
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that cancels this auditor's runs
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Materializes the seed pages of a source
    pub async fn resolve_seeds(&self, source: &SeedSource) -> Vec<String> {
        resolve_seeds(source, &self.client, &self.config).await
    }

    /// Runs a complete audit
    ///
    /// 1. Resolve the seed pages; if there are none, return an empty
    ///    [`AuditOutcome::NoSeeds`] report
    /// 2. For each seed page, in order, fetch it and check every link in its
    ///    main content
    /// 3. Call `on_progress` after each seed page
    ///
    /// # Example
    ///
    /// ```no_run
    /// use link_audit::{Auditor, Config, SeedSource};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let auditor = Auditor::new(Config::default())?;
    /// let source = SeedSource::Single("https://example.com/".to_string());
    /// let report = auditor
    ///     .run(&source, |p| println!("{}/{} {}", p.completed, p.total, p.page_url))
    ///     .await;
    /// println!("{} findings", report.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F>(&self, source: &SeedSource, on_progress: F) -> AuditReport
    where
        F: FnMut(&AuditProgress),
    {
        tracing::info!("Resolving seed pages from {}", source.kind());
        let pages = self.resolve_seeds(source).await;

        if pages.is_empty() {
            tracing::warn!("No valid input: the {} yielded no pages", source.kind());
            return AuditReport::new(0).finish(AuditOutcome::NoSeeds);
        }

        self.audit_pages(&pages, on_progress).await
    }

    /// Audits an already materialized list of seed pages
    pub async fn audit_pages<F>(&self, pages: &[String], mut on_progress: F) -> AuditReport
    where
        F: FnMut(&AuditProgress),
    {
        let mut report = AuditReport::new(pages.len());
        if pages.is_empty() {
            return report.finish(AuditOutcome::NoSeeds);
        }

        tracing::info!("Starting audit of {} pages", pages.len());

        for (index, page_url) in pages.iter().enumerate() {
            if self.cancel.is_cancelled() {
                return self.cancelled(report);
            }

            tracing::info!("Scanning {}/{}: {}", index + 1, pages.len(), page_url);

            if let Flow::Cancelled = self.audit_page(page_url, &mut report).await {
                return self.cancelled(report);
            }

            let progress = AuditProgress {
                completed: index + 1,
                total: pages.len(),
                page_url: page_url.clone(),
            };
            tracing::debug!("Progress: {:.0}%", progress.fraction() * 100.0);
            on_progress(&progress);
        }

        tracing::info!(
            "Audit complete: {} findings from {} links on {} pages ({} skipped)",
            report.len(),
            report.links_checked,
            report.pages_audited,
            report.pages_skipped
        );

        report.finish(AuditOutcome::Completed)
    }

    /// Audits one seed page, appending its findings to the report
    async fn audit_page(&self, page_url: &str, report: &mut AuditReport) -> Flow {
        let anchors = match self.page_anchors(page_url).await {
            Some(anchors) => anchors,
            None => {
                report.pages_skipped += 1;
                return Flow::Continue;
            }
        };

        tracing::debug!("{} links in main content of {}", anchors.len(), page_url);

        for anchor in &anchors {
            if self.cancel.is_cancelled() {
                return Flow::Cancelled;
            }

            let check = resolve_link(&self.client, &anchor.url, self.config.crawler.max_redirects).await;
            report.links_checked += 1;
            match &check {
                LinkCheck::Redirected { final_status, .. } => tracing::debug!(
                    "{} -> {} ({}, final {})",
                    anchor.url,
                    check.status(),
                    check.destination(),
                    final_status
                ),
                _ => tracing::debug!("{} -> {} ({})", anchor.url, check.status(), check.destination()),
            }

            if let Some(finding) = check.into_finding(page_url, anchor) {
                report.findings.push(finding);
            }

            tokio::select! {
                _ = self.limiter.pace() => {}
                _ = self.cancel.cancelled() => return Flow::Cancelled,
            }
        }

        report.pages_audited += 1;
        Flow::Continue
    }

    /// Fetches a seed page and extracts its links
    ///
    /// Returns None when the page cannot be audited; the reason is logged.
    async fn page_anchors(&self, page_url: &str) -> Option<Vec<Anchor>> {
        let Some(url) = parse_page_url(page_url) else {
            tracing::warn!("Skipping {}: not an HTTP(S) URL", page_url);
            return None;
        };

        match fetch_page(&self.client, &url, self.config.crawler.max_redirects).await {
            Ok(page) => {
                if page.final_url != page.url {
                    tracing::debug!("{} served from {}", page.url, page.final_url);
                }
                if !(200..300).contains(&page.status_code) {
                    tracing::warn!(
                        "{} answered HTTP {}; auditing its content anyway",
                        page.url,
                        page.status_code
                    );
                }
                Some(extract_anchors(&page.body, &page.url))
            }
            Err(e) => {
                tracing::warn!("Skipping page: {}", e);
                None
            }
        }
    }

    fn cancelled(&self, report: AuditReport) -> AuditReport {
        tracing::warn!(
            "Audit cancelled after {} of {} pages",
            report.pages_audited + report.pages_skipped,
            report.pages_total
        );
        report.finish(AuditOutcome::Cancelled)
    }
}

/// Runs an audit with the given configuration
///
/// Convenience wrapper around [`Auditor::new`] and [`Auditor::run`] for callers
/// that do not need progress notifications.
pub async fn run_audit(config: Config, source: &SeedSource) -> Result<AuditReport, AuditError> {
    let auditor = Auditor::new(config)?;
    Ok(auditor.run(source, |_| {}).await)
}
