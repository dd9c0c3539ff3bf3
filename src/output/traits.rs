//! Output writer trait and error types
//!
//! Every artifact produced from a finished report goes through
//! [`ReportWriter`], so the command line can treat them uniformly.

use crate::report::AuditReport;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Something that writes a finished report somewhere
pub trait ReportWriter {
    /// Short description used in log messages
    fn describe(&self) -> String;

    /// Writes the report
    fn write_report(&self, report: &AuditReport) -> OutputResult<()>;
}

/// Writes findings to a CSV file
#[derive(Debug, Clone)]
pub struct CsvFileWriter {
    pub path: PathBuf,
}

impl ReportWriter for CsvFileWriter {
    fn describe(&self) -> String {
        format!("CSV export {}", self.path.display())
    }

    fn write_report(&self, report: &AuditReport) -> OutputResult<()> {
        crate::output::csv_output::export_csv(report, &self.path)
    }
}

/// Writes a markdown summary file
#[derive(Debug, Clone)]
pub struct MarkdownFileWriter {
    pub path: PathBuf,

    /// Hash of the configuration file the audit ran with
    pub config_hash: Option<String>,
}

impl ReportWriter for MarkdownFileWriter {
    fn describe(&self) -> String {
        format!("markdown summary {}", self.path.display())
    }

    fn write_report(&self, report: &AuditReport) -> OutputResult<()> {
        crate::output::markdown::generate_markdown_summary(
            report,
            self.config_hash.as_deref(),
            &self.path,
        )
    }
}
