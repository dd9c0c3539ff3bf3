//! Output module for exporting audit reports
//!
//! This module handles:
//! - CSV export of the findings table
//! - Markdown summaries of a run
//! - Statistics for the command line

mod csv_output;
mod markdown;
pub mod stats;
mod traits;

pub use csv_output::{export_csv, format_csv, write_csv, CSV_HEADERS, DEFAULT_CSV_PATH};
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{print_statistics, AuditStatistics, StatusClass};
pub use traits::{CsvFileWriter, MarkdownFileWriter, OutputError, OutputResult, ReportWriter};
