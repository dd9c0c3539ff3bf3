//! Sitemap feed resolution
//!
//! Reads every `<loc>` element in the standard sitemap namespace, at any depth,
//! in document order. Sitemap index files are not expanded: the `loc` values
//! of their child sitemaps are returned like any other page URL.

use crate::crawler::follow_redirects;
use crate::{LinkCheckError, SitemapError};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use reqwest::Client;
use url::Url;

/// Namespace of the sitemap protocol
pub const SITEMAP_NS: &[u8] = b"http://www.sitemaps.org/schemas/sitemap/0.9";

/// Parses sitemap XML and returns its `loc` values
///
/// Only `loc` elements bound to [`SITEMAP_NS`] are read; values are trimmed
/// and empty ones skipped.
///
/// # Errors
///
/// Returns [`SitemapError::Xml`] if the document is not well-formed XML
/// (mismatched or unclosed tags, no root element, content after the root
/// element, bad escapes).
///
/// # Examples
///
/// ```
/// use link_audit::seeds::parse_sitemap;
///
/// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
/// <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>https://example.com/page1</loc></url>
///   <url><loc>https://example.com/page2</loc></url>
/// </urlset>"#;
///
/// let urls = parse_sitemap(xml).unwrap();
/// assert_eq!(urls, vec!["https://example.com/page1", "https://example.com/page2"]);
/// ```
pub fn parse_sitemap(xml: &str) -> Result<Vec<String>, SitemapError> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut urls = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut root_closed = false;
    let mut current_loc: Option<String> = None;

    loop {
        match reader.read_resolved_event() {
            Ok((ns, Event::Start(e))) => {
                if root_closed {
                    return Err(junk_after_root());
                }
                depth += 1;
                saw_root = true;
                if is_sitemap_ns(&ns) && e.local_name().as_ref() == b"loc" {
                    current_loc = Some(String::new());
                }
            }
            Ok((_, Event::Empty(_))) => {
                if root_closed {
                    return Err(junk_after_root());
                }
                saw_root = true;
                root_closed = depth == 0;
            }
            Ok((_, Event::End(_))) => {
                depth = depth.saturating_sub(1);
                root_closed = depth == 0;
                if let Some(loc) = current_loc.take() {
                    let loc = loc.trim();
                    if !loc.is_empty() {
                        urls.push(loc.to_string());
                    }
                }
            }
            Ok((_, Event::Text(e))) if root_closed => {
                if !e.iter().all(u8::is_ascii_whitespace) {
                    return Err(junk_after_root());
                }
            }
            Ok((_, Event::CData(_))) if root_closed => {
                return Err(junk_after_root());
            }
            Ok((_, Event::Text(e))) => {
                if let Some(loc) = current_loc.as_mut() {
                    let text = e.unescape().map_err(|e| SitemapError::Xml(e.to_string()))?;
                    loc.push_str(&text);
                }
            }
            Ok((_, Event::CData(e))) => {
                if let Some(loc) = current_loc.as_mut() {
                    loc.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok((_, Event::Eof)) => break,
            Err(e) => return Err(SitemapError::Xml(e.to_string())),
            _ => {}
        }
    }

    if !saw_root {
        return Err(SitemapError::Xml("document has no root element".to_string()));
    }
    if depth != 0 {
        return Err(SitemapError::Xml(format!(
            "document ended with {} unclosed element(s)",
            depth
        )));
    }

    Ok(urls)
}

fn junk_after_root() -> SitemapError {
    SitemapError::Xml("content after the document element".to_string())
}

fn is_sitemap_ns(ns: &ResolveResult<'_>) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == SITEMAP_NS)
}

/// Fetches a sitemap feed and returns its `loc` values
///
/// The request goes through the shared client (so the configured timeout
/// applies) with `user_agent` as the identity header. Redirects are followed
/// up to `max_redirects` hops; a final response outside 2xx is an error.
pub async fn fetch_sitemap_urls(
    client: &Client,
    url: &str,
    user_agent: &str,
    max_redirects: u32,
) -> Result<Vec<String>, SitemapError> {
    tracing::debug!("Fetching sitemap: {}", url);

    let feed_url = Url::parse(url).map_err(|e| SitemapError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let chain = follow_redirects(client, &feed_url, max_redirects, Some(user_agent))
        .await
        .map_err(|e| match e {
            LinkCheckError::Http(source) => SitemapError::Http {
                url: url.to_string(),
                source,
            },
            other => SitemapError::Redirect {
                url: url.to_string(),
                source: other,
            },
        })?;

    if !chain.hops.is_empty() {
        tracing::debug!("Sitemap {} redirected to {}", url, chain.final_url());
    }

    let status = chain.response.status();
    if !status.is_success() {
        return Err(SitemapError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let xml = chain.response.text().await.map_err(|e| SitemapError::Http {
        url: url.to_string(),
        source: e,
    })?;

    let urls = parse_sitemap(&xml)?;
    tracing::info!("Sitemap {} lists {} URLs", url, urls.len());
    Ok(urls)
}
