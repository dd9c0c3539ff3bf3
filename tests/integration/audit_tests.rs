//! Integration tests for the audit engine
//!
//! These tests use wiremock to create mock HTTP servers and run full audits
//! end-to-end, from seed source to exported report.

use link_audit::config::{Config, CrawlerConfig};
use link_audit::crawler::NoDelay;
use link_audit::output::format_csv;
use link_audit::report::{AuditOutcome, Destination, LinkStatus, NO_TEXT_PLACEHOLDER};
use link_audit::{Auditor, SeedSource};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with slow mode off
fn create_test_config() -> Config {
    Config {
        crawler: CrawlerConfig {
            slow_mode: false,
            request_timeout_secs: 5,
            ..CrawlerConfig::default()
        },
        ..Config::default()
    }
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

async fn mount_redirect(server: &MockServer, route: &str, status: u16, location: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).insert_header("location", location))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_two_page_audit_reports_non_200_links_in_order() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/page1",
        r#"<html><body>
            <nav><a href="/nav-missing">Nav</a></nav>
            <main>
                <a href="/ok">Working link</a>
                <a href="/missing">Broken link</a>
            </main>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_page(
        &server,
        "/page2",
        r#"<html><body><article><a href="/temp">Temporary</a></article></body></html>"#
            .to_string(),
    )
    .await;

    mount_status(&server, "/ok", 200).await;
    mount_status(&server, "/missing", 404).await;
    mount_status(&server, "/nav-missing", 404).await;
    mount_redirect(&server, "/temp", 302, "/landing").await;
    mount_status(&server, "/landing", 200).await;

    let seeds = SeedSource::List(format!("{base}/page1\n{base}/page2\n"));
    let auditor = Auditor::new(create_test_config()).expect("Failed to create auditor");

    let mut progress = Vec::new();
    let report = auditor
        .run(&seeds, |p| progress.push((p.completed, p.total)))
        .await;

    assert_eq!(report.outcome, AuditOutcome::Completed);
    assert_eq!(progress, vec![(1, 2), (2, 2)]);
    assert_eq!(report.links_checked, 3);
    assert_eq!(report.len(), 2, "Expected exactly the 404 and the 302");

    let first = &report.findings[0];
    assert_eq!(first.source_page, format!("{base}/page1"));
    assert_eq!(first.anchor_text, "Broken link");
    assert_eq!(first.link_url, format!("{base}/missing"));
    assert_eq!(first.status, LinkStatus::Code(404));
    assert_eq!(first.final_destination, Destination::Direct);

    let second = &report.findings[1];
    assert_eq!(second.source_page, format!("{base}/page2"));
    assert_eq!(second.link_url, format!("{base}/temp"));
    assert_eq!(second.status, LinkStatus::Code(302));
    assert_eq!(
        second.final_destination,
        Destination::Url(format!("{base}/landing"))
    );
}

#[tokio::test]
async fn test_redirect_chain_reports_first_hop() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<main>
            <a href="/moved">Moved</a>
            <a href="/moved-dead">Moved then dead</a>
        </main>"#
            .to_string(),
    )
    .await;
    mount_redirect(&server, "/moved", 301, "/target").await;
    mount_status(&server, "/target", 200).await;
    mount_redirect(&server, "/moved-dead", 301, "/dead").await;
    mount_status(&server, "/dead", 404).await;

    let auditor = Auditor::new(create_test_config()).unwrap();
    let report = auditor
        .run(&SeedSource::Single(format!("{base}/")), |_| {})
        .await;

    assert_eq!(report.len(), 2);

    assert_eq!(report.findings[0].status, LinkStatus::Code(301));
    assert_eq!(
        report.findings[0].final_destination,
        Destination::Url(format!("{base}/target"))
    );

    assert_eq!(report.findings[1].status, LinkStatus::Code(301));
    assert_eq!(
        report.findings[1].final_destination,
        Destination::Url(format!("{base}/dead"))
    );
}

#[tokio::test]
async fn test_sitemap_seeded_audit() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{base}/a</loc></url>
  <url><loc>{base}/b</loc></url>
</urlset>"#
        )))
        .mount(&server)
        .await;

    mount_page(
        &server,
        "/a",
        r#"<main><a href="/b"><img src="/logo.png"></a></main>"#.to_string(),
    )
    .await;
    mount_page(
        &server,
        "/b",
        r#"<main><a href="/gone">Gone</a></main>"#.to_string(),
    )
    .await;
    mount_status(&server, "/gone", 410).await;

    let auditor = Auditor::new(create_test_config()).unwrap();
    let report = auditor
        .run(&SeedSource::Sitemap(format!("{base}/sitemap.xml")), |_| {})
        .await;

    assert_eq!(report.pages_total, 2);
    assert_eq!(report.pages_audited, 2);
    assert_eq!(report.len(), 1);
    assert_eq!(report.findings[0].source_page, format!("{base}/b"));
    assert_eq!(report.findings[0].status, LinkStatus::Code(410));
}

#[tokio::test]
async fn test_image_only_link_uses_placeholder() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<main><a href="/banner"><img src="/banner.png" alt="Banner"></a></main>"#.to_string(),
    )
    .await;
    mount_status(&server, "/banner", 404).await;

    let auditor = Auditor::new(create_test_config()).unwrap();
    let report = auditor
        .run(&SeedSource::Single(format!("{base}/")), |_| {})
        .await;

    assert_eq!(report.len(), 1);
    assert_eq!(report.findings[0].anchor_text, NO_TEXT_PLACEHOLDER);
}

#[tokio::test]
async fn test_malformed_sitemap_is_noop() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<urlset><url><loc>"))
        .mount(&server)
        .await;

    let auditor = Auditor::new(create_test_config()).unwrap();
    let report = auditor
        .run(
            &SeedSource::Sitemap(format!("{}/sitemap.xml", server.uri())),
            |_| {},
        )
        .await;

    assert_eq!(report.outcome, AuditOutcome::NoSeeds);
    assert!(report.is_empty());
}

#[tokio::test]
async fn test_page_without_links_contributes_nothing() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/empty",
        r#"<html><body><main><p>Just text.</p></main>
            <footer><a href="/footer-missing">Footer</a></footer></body></html>"#
            .to_string(),
    )
    .await;

    let auditor = Auditor::new(create_test_config()).unwrap();
    let report = auditor
        .run(&SeedSource::Single(format!("{base}/empty")), |_| {})
        .await;

    assert!(report.is_empty());
    assert_eq!(report.links_checked, 0);
    assert_eq!(report.pages_audited, 1);
}

#[tokio::test]
async fn test_slow_mode_paces_link_checks() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<main><a href="/one">1</a><a href="/two">2</a></main>"#.to_string(),
    )
    .await;
    mount_status(&server, "/one", 200).await;
    mount_status(&server, "/two", 200).await;

    let mut config = create_test_config();
    config.crawler.slow_mode = true;
    config.crawler.delay_ms = 100;

    let auditor = Auditor::new(config).unwrap();
    let start = Instant::now();
    let report = auditor
        .run(&SeedSource::Single(format!("{base}/")), |_| {})
        .await;

    assert!(report.is_empty());
    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_report_exports_as_csv() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<main><a href="/missing">Missing, really</a></main>"#.to_string(),
    )
    .await;
    mount_status(&server, "/missing", 404).await;

    let auditor = Auditor::new(create_test_config())
        .unwrap()
        .with_rate_limiter(Box::new(NoDelay));
    let report = auditor
        .run(&SeedSource::Single(format!("{base}/")), |_| {})
        .await;

    let csv = format_csv(&report).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "Source Page,Anchor Text,Link in Body,Status Code,Final Destination"
    );
    assert_eq!(
        lines[1],
        format!("{base}/,\"Missing, really\",{base}/missing,404,Direct")
    );
    assert_eq!(lines.len(), 2);
}
