//! URL handling module for link-audit
//!
//! Relative link resolution and scheme filtering shared by the link extractor
//! and the redirect resolver.

use url::Url;

/// Returns true for `http` and `https` URLs
pub fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Resolves an href found on a page against the page's own URL
///
/// Standard relative resolution is applied: a bare path is rooted at the page's
/// origin, `../` segments are collapsed, and protocol-relative or fully
/// qualified hrefs are kept as they are. A fragment-only href resolves to the
/// page itself.
///
/// Returns None if the href cannot be resolved or the result is not an
/// HTTP(S) URL (`mailto:`, `tel:`, `javascript:`, `data:` and so on).
///
/// # Examples
///
/// ```
/// use link_audit::url::resolve_href;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/a/b").unwrap();
/// let url = resolve_href("../c", &base).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/c");
/// ```
pub fn resolve_href(href: &str, base_url: &Url) -> Option<Url> {
    let resolved = base_url.join(href).ok()?;
    is_http(&resolved).then_some(resolved)
}

/// Parses a seed page URL, accepting only HTTP(S)
pub fn parse_page_url(input: &str) -> Option<Url> {
    let url = Url::parse(input.trim()).ok()?;
    is_http(&url).then_some(url)
}
