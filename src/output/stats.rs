//! Statistics derived from an audit report
//!
//! This module groups findings by status class and by source page, and
//! prints the result for the command line.

use crate::report::{AuditReport, LinkStatus};
use std::collections::BTreeMap;

/// Broad class of a finding's initial status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusClass {
    /// 3xx: the link works but goes through a redirect
    Redirect,
    /// 4xx: broken link
    ClientError,
    /// 5xx: the target server failed
    ServerError,
    /// The request itself failed
    Transport,
    /// Anything else (1xx, non-200 2xx)
    Other,
}

impl StatusClass {
    pub fn of(status: LinkStatus) -> Self {
        if status.is_redirect() {
            return Self::Redirect;
        }
        match status.code() {
            None => Self::Transport,
            Some(400..=499) => Self::ClientError,
            Some(500..=599) => Self::ServerError,
            Some(_) => Self::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Redirect => "Redirects (3xx)",
            Self::ClientError => "Client errors (4xx)",
            Self::ServerError => "Server errors (5xx)",
            Self::Transport => "Errors/timeouts",
            Self::Other => "Other statuses",
        }
    }
}

/// Audit statistics summary
#[derive(Debug, Clone, Default)]
pub struct AuditStatistics {
    /// Seed pages resolved
    pub pages_total: usize,

    /// Seed pages audited
    pub pages_audited: usize,

    /// Seed pages that could not be fetched
    pub pages_skipped: usize,

    /// Link checks performed
    pub links_checked: usize,

    /// Total findings
    pub total_findings: usize,

    /// Findings per status class
    pub by_class: BTreeMap<StatusClass, usize>,

    /// Findings per exact status
    pub by_status: BTreeMap<String, usize>,

    /// Findings per source page, in report order
    pub by_page: Vec<(String, usize)>,
}

impl AuditStatistics {
    /// Computes statistics for a report
    pub fn from_report(report: &AuditReport) -> Self {
        let mut by_class = BTreeMap::new();
        let mut by_status = BTreeMap::new();
        let mut by_page: Vec<(String, usize)> = Vec::new();

        for finding in &report.findings {
            *by_class.entry(StatusClass::of(finding.status)).or_insert(0) += 1;
            *by_status.entry(finding.status.to_string()).or_insert(0) += 1;

            match by_page.last_mut() {
                Some((page, count)) if *page == finding.source_page => *count += 1,
                _ => by_page.push((finding.source_page.clone(), 1)),
            }
        }

        Self {
            pages_total: report.pages_total,
            pages_audited: report.pages_audited,
            pages_skipped: report.pages_skipped,
            links_checked: report.links_checked,
            total_findings: report.findings.len(),
            by_class,
            by_status,
            by_page,
        }
    }

    /// Share of checked links that produced a finding, as a percentage
    pub fn finding_rate(&self) -> f64 {
        if self.links_checked == 0 {
            return 0.0;
        }
        (self.total_findings as f64 / self.links_checked as f64) * 100.0
    }

    pub fn count(&self, class: StatusClass) -> usize {
        self.by_class.get(&class).copied().unwrap_or(0)
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &AuditStatistics) {
    println!("=== Audit Statistics ===\n");

    println!("Overview:");
    println!("  Seed pages: {}", stats.pages_total);
    println!("  Pages audited: {}", stats.pages_audited);
    println!("  Pages skipped: {}", stats.pages_skipped);
    println!("  Links checked: {}", stats.links_checked);
    println!(
        "  Findings: {} ({:.1}% of checked links)",
        stats.total_findings,
        stats.finding_rate()
    );
    println!();

    if !stats.by_class.is_empty() {
        println!("Findings by Class:");
        for (class, count) in &stats.by_class {
            println!("  {}: {}", class.label(), count);
        }
        println!();

        println!("Findings by Status:");
        for (status, count) in &stats.by_status {
            println!("  {}: {}", status, count);
        }
        println!();
    }

    if !stats.by_page.is_empty() {
        println!("Pages with Findings ({}):", stats.by_page.len());
        for (page, count) in &stats.by_page {
            println!("  - {} ({})", page, count);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Destination, Finding};

    fn finding(source: &str, status: LinkStatus) -> Finding {
        Finding {
            source_page: source.to_string(),
            anchor_text: "Link".to_string(),
            link_url: "https://example.com/x".to_string(),
            status,
            final_destination: Destination::Direct,
        }
    }

    #[test]
    fn test_status_class() {
        assert_eq!(StatusClass::of(LinkStatus::Code(301)), StatusClass::Redirect);
        assert_eq!(StatusClass::of(LinkStatus::Code(404)), StatusClass::ClientError);
        assert_eq!(StatusClass::of(LinkStatus::Code(503)), StatusClass::ServerError);
        assert_eq!(StatusClass::of(LinkStatus::Code(204)), StatusClass::Other);
        assert_eq!(StatusClass::of(LinkStatus::Error), StatusClass::Transport);
    }

    #[test]
    fn test_statistics_from_report() {
        let mut report = AuditReport::new(3);
        report.pages_audited = 2;
        report.pages_skipped = 1;
        report.links_checked = 8;
        report.findings = vec![
            finding("https://a.com/", LinkStatus::Code(301)),
            finding("https://a.com/", LinkStatus::Code(404)),
            finding("https://b.com/", LinkStatus::Code(301)),
            finding("https://b.com/", LinkStatus::Error),
        ];

        let stats = AuditStatistics::from_report(&report);

        assert_eq!(stats.total_findings, 4);
        assert_eq!(stats.count(StatusClass::Redirect), 2);
        assert_eq!(stats.count(StatusClass::ClientError), 1);
        assert_eq!(stats.count(StatusClass::Transport), 1);
        assert_eq!(stats.count(StatusClass::ServerError), 0);
        assert_eq!(stats.by_status.get("301"), Some(&2));
        assert_eq!(stats.by_status.get("Error/Timeout"), Some(&1));
        assert_eq!(
            stats.by_page,
            vec![
                ("https://a.com/".to_string(), 2),
                ("https://b.com/".to_string(), 2)
            ]
        );
        assert!((stats.finding_rate() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_finding_rate_without_links() {
        let stats = AuditStatistics::from_report(&AuditReport::new(0));
        assert_eq!(stats.finding_rate(), 0.0);
        assert!(stats.by_page.is_empty());
    }
}
