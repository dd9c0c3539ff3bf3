//! link-audit main entry point
//!
//! This is the command-line interface for the link-audit engine.

use clap::{ArgGroup, Parser};
use link_audit::config::{load_config_with_hash, validate, Config};
use link_audit::output::{
    print_statistics, AuditStatistics, CsvFileWriter, MarkdownFileWriter, ReportWriter,
};
use link_audit::report::AuditOutcome;
use link_audit::{Auditor, SeedSource};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// link-audit: find redirects and broken links in page content
///
/// Fetches each seed page, collects the links in its main content region and
/// requests every one of them. Links that do not answer with a direct 200 are
/// reported along with their first status code and final destination.
#[derive(Parser, Debug)]
#[command(name = "link-audit")]
#[command(version)]
#[command(about = "Find redirects and broken links inside page content", long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["url", "list", "sitemap"])))]
struct Cli {
    /// Audit a single page
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Audit every page listed in a file, one URL per line ("-" reads stdin)
    #[arg(long, value_name = "FILE")]
    list: Option<PathBuf>,

    /// Audit every page listed in a sitemap feed
    #[arg(long, value_name = "URL")]
    sitemap: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Disable the pause between link checks
    #[arg(long)]
    no_delay: bool,

    /// Export findings as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Write a markdown summary
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Resolve and print the seed pages without auditing them
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load_configuration(&cli)?;
    let source = seed_source(&cli)?;

    let auditor = Auditor::new(config)?;

    if cli.dry_run {
        handle_dry_run(&auditor, &source).await;
        return Ok(());
    }

    handle_audit(auditor, &source, config_hash).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_audit=info,warn"),
            1 => EnvFilter::new("link_audit=debug,info"),
            2 => EnvFilter::new("link_audit=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file if one was given and applies command-line overrides
fn load_configuration(
    cli: &Cli,
) -> Result<(Config, Option<String>), Box<dyn std::error::Error>> {
    let (mut config, hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    (cfg, Some(hash))
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => (Config::default(), None),
    };

    if cli.no_delay {
        config.crawler.slow_mode = false;
    }
    if let Some(path) = &cli.csv {
        config.output.csv_path = Some(path.display().to_string());
    }
    if let Some(path) = &cli.summary {
        config.output.summary_path = Some(path.display().to_string());
    }
    validate(&config)?;

    Ok((config, hash))
}

/// Builds the seed source selected on the command line
fn seed_source(cli: &Cli) -> Result<SeedSource, Box<dyn std::error::Error>> {
    if let Some(url) = &cli.url {
        return Ok(SeedSource::Single(url.clone()));
    }

    if let Some(path) = &cli.list {
        let text = if path.as_os_str() == "-" {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        } else {
            std::fs::read_to_string(path)?
        };
        return Ok(SeedSource::List(text));
    }

    match &cli.sitemap {
        Some(url) => Ok(SeedSource::Sitemap(url.clone())),
        None => Err("one of --url, --list or --sitemap is required".into()),
    }
}

/// Handles the --dry-run mode: shows which pages would be audited
async fn handle_dry_run(auditor: &Auditor, source: &SeedSource) {
    println!("=== link-audit Dry Run ===\n");

    let crawler = &auditor.config().crawler;
    println!("Crawler Configuration:");
    println!("  Slow mode: {} ({}ms)", crawler.slow_mode, crawler.delay_ms);
    println!("  Request timeout: {}s", crawler.request_timeout_secs);
    println!("  Max redirects: {}", crawler.max_redirects);

    let pages = auditor.resolve_seeds(source).await;
    println!("\nSeed pages from {} ({}):", source.kind(), pages.len());
    for page in &pages {
        println!("  * {}", page);
    }

    if pages.is_empty() {
        println!("\n! Please provide a valid URL or list of URLs.");
    } else {
        println!("\n✓ Would audit {} pages", pages.len());
    }
}

/// Handles the main audit operation
async fn handle_audit(
    auditor: Auditor,
    source: &SeedSource,
    config_hash: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let cancel = auditor.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current request");
            cancel.cancel();
        }
    });

    let report = auditor
        .run(source, |progress| {
            println!(
                "[{:>3.0}%] Scanned {}/{}: {}",
                progress.fraction() * 100.0,
                progress.completed,
                progress.total,
                progress.page_url
            );
        })
        .await;

    if report.outcome == AuditOutcome::NoSeeds {
        println!("Please provide a valid URL or list of URLs.");
        return Ok(());
    }

    println!();
    print_statistics(&AuditStatistics::from_report(&report));

    if report.is_empty() {
        println!("Great news! No redirects or broken links found in the body text of these pages.");
    } else {
        println!("Findings (Redirects & Broken Links):");
        for finding in &report.findings {
            println!(
                "  [{}] {} -> {} ({}) on {}",
                finding.status,
                finding.anchor_text,
                finding.link_url,
                finding.final_destination,
                finding.source_page
            );
        }
    }

    if report.outcome == AuditOutcome::Cancelled {
        println!("\n! Audit was interrupted; the report is partial.");
    }

    let output = &auditor.config().output;
    let mut writers: Vec<Box<dyn ReportWriter>> = Vec::new();
    if let Some(path) = &output.csv_path {
        writers.push(Box::new(CsvFileWriter {
            path: PathBuf::from(path),
        }));
    }
    if let Some(path) = &output.summary_path {
        writers.push(Box::new(MarkdownFileWriter {
            path: PathBuf::from(path),
            config_hash,
        }));
    }

    for writer in &writers {
        writer.write_report(&report)?;
        println!("✓ Wrote {}", writer.describe());
    }

    Ok(())
}
