//! CSV export of audit findings
//!
//! One row per finding, header row first, with the column set the audit has
//! always exported.

use crate::output::traits::OutputResult;
use crate::report::AuditReport;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Column headers, in export order
pub const CSV_HEADERS: [&str; 5] = [
    "Source Page",
    "Anchor Text",
    "Link in Body",
    "Status Code",
    "Final Destination",
];

/// Default export file name
pub const DEFAULT_CSV_PATH: &str = "audit_results.csv";

/// Writes the report's findings as CSV
///
/// The header row is always written, so an empty report still produces a
/// valid table.
pub fn write_csv<W: Write>(report: &AuditReport, writer: W) -> OutputResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(CSV_HEADERS)?;
    for finding in &report.findings {
        writer.serialize(finding)?;
    }
    writer.flush()?;

    Ok(())
}

/// Formats the report's findings as a CSV string
pub fn format_csv(report: &AuditReport) -> OutputResult<String> {
    let mut buffer = Vec::new();
    write_csv(report, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Exports the report's findings to a CSV file
pub fn export_csv(report: &AuditReport, output_path: &Path) -> OutputResult<()> {
    let file = File::create(output_path)?;
    write_csv(report, file)
}
