//! Audit report types
//!
//! The report is the only output of an audit: an ordered list of findings
//! (seed page order, then link order within each page) plus counters
//! describing the run.

mod finding;

pub use finding::{Destination, Finding, LinkStatus, NO_TEXT_PLACEHOLDER};

use chrono::{DateTime, Utc};

/// How an audit ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditOutcome {
    /// Every seed page was processed
    Completed,

    /// The seed source resolved to no pages; nothing was audited
    NoSeeds,

    /// The audit was cancelled; the report is partial
    Cancelled,
}

impl AuditOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::NoSeeds => "no seeds",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Full result of one audit run
#[derive(Debug, Clone)]
pub struct AuditReport {
    /// Problematic links, in discovery order
    pub findings: Vec<Finding>,

    /// How the run ended
    pub outcome: AuditOutcome,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Number of seed pages resolved from the seed source
    pub pages_total: usize,

    /// Seed pages whose links were checked
    pub pages_audited: usize,

    /// Seed pages that could not be fetched
    pub pages_skipped: usize,

    /// Individual link checks performed
    pub links_checked: usize,
}

impl AuditReport {
    /// Creates an empty report for a run starting now
    pub fn new(pages_total: usize) -> Self {
        let now = Utc::now();
        Self {
            findings: Vec::new(),
            outcome: AuditOutcome::Completed,
            started_at: now,
            finished_at: now,
            pages_total,
            pages_audited: 0,
            pages_skipped: 0,
            links_checked: 0,
        }
    }

    /// Stamps the finish time and outcome
    pub(crate) fn finish(mut self, outcome: AuditOutcome) -> Self {
        self.outcome = outcome;
        self.finished_at = Utc::now();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Wall-clock duration of the run in seconds
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}
