//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of an audit:
//! run information, statistics and the findings table.

use crate::output::stats::AuditStatistics;
use crate::output::traits::OutputResult;
use crate::report::{AuditOutcome, AuditReport};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown summary and writes it to `output_path`
pub fn generate_markdown_summary(
    report: &AuditReport,
    config_hash: Option<&str>,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_summary(report, config_hash);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Escapes characters that would break a markdown table cell
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

/// Formats an audit report as markdown
pub fn format_markdown_summary(report: &AuditReport, config_hash: Option<&str>) -> String {
    let stats = AuditStatistics::from_report(report);
    let mut md = String::new();

    md.push_str("# Link Audit Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Started**: {}\n",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        report.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!(
        "- **Duration**: {:.1} seconds\n",
        report.duration_seconds()
    ));
    md.push_str(&format!("- **Outcome**: {}\n", report.outcome.as_str()));
    if let Some(hash) = config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    md.push_str("## Statistics\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Seed pages | {} |\n", stats.pages_total));
    md.push_str(&format!("| Pages audited | {} |\n", stats.pages_audited));
    md.push_str(&format!("| Pages skipped | {} |\n", stats.pages_skipped));
    md.push_str(&format!("| Links checked | {} |\n", stats.links_checked));
    md.push_str(&format!("| Findings | {} |\n", stats.total_findings));
    for (class, count) in &stats.by_class {
        md.push_str(&format!("| {} | {} |\n", class.label(), count));
    }
    md.push('\n');

    if report.outcome == AuditOutcome::NoSeeds {
        md.push_str("No valid seed pages were provided; nothing was audited.\n");
        return md;
    }

    if report.is_empty() {
        md.push_str("No redirects or broken links found in the body content of these pages.\n");
        return md;
    }

    md.push_str("## Findings (Redirects & Broken Links)\n\n");
    md.push_str("| Source Page | Anchor Text | Link in Body | Status Code | Final Destination |\n");
    md.push_str("|-------------|-------------|--------------|-------------|-------------------|\n");
    for finding in &report.findings {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            escape_cell(&finding.source_page),
            escape_cell(&finding.anchor_text),
            escape_cell(&finding.link_url),
            finding.status,
            escape_cell(&finding.final_destination.to_string()),
        ));
    }

    md
}
