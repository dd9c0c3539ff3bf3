//! HTML parser for extracting in-content links
//!
//! Only the page's main content region is searched, so navigation and footer
//! links are left out of the audit.

use crate::report::NO_TEXT_PLACEHOLDER;
use crate::url::resolve_href;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Main content containers, most specific first
const MAIN_REGION_SELECTORS: &[&str] = &["main", "article", "#MainContent", "body"];

/// A link found in a page's main content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Absolute link URL
    pub url: Url,

    /// Visible text, or the no-text placeholder
    pub text: String,
}

/// Locates the main content region of a document
///
/// Precedence: `<main>`, `<article>`, `#MainContent`, `<body>`, then the
/// whole document.
fn main_region(document: &Html) -> ElementRef<'_> {
    MAIN_REGION_SELECTORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element())
}

/// Collapses the text content of an element into a single trimmed line
fn visible_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts every link from the main content region of an HTML page
///
/// # Extraction Rules
///
/// - Every `<a href="...">` inside the main region, in document order
/// - Hrefs are resolved against `base_url` (the page's own URL)
/// - Links that do not resolve to `http`/`https` are dropped
/// - Anchors without text (image-only links) get [`NO_TEXT_PLACEHOLDER`]
///
/// # Example
///
/// ```
/// use link_audit::crawler::extract_anchors;
/// use url::Url;
///
/// let html = r#"<html><body><nav><a href="/home">Home</a></nav>
///     <main><a href="/guide">Guide</a></main></body></html>"#;
/// let base_url = Url::parse("https://example.com/docs/").unwrap();
/// let anchors = extract_anchors(html, &base_url);
/// assert_eq!(anchors.len(), 1);
/// assert_eq!(anchors[0].url.as_str(), "https://example.com/guide");
/// ```
pub fn extract_anchors(html: &str, base_url: &Url) -> Vec<Anchor> {
    let document = Html::parse_document(html);
    let region = main_region(&document);

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    region
        .select(&a_selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            let url = resolve_href(href, base_url)?;

            let text = visible_text(&element);
            let text = if text.is_empty() {
                NO_TEXT_PLACEHOLDER.to_string()
            } else {
                text
            };

            Some(Anchor { url, text })
        })
        .collect()
}
