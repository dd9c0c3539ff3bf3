//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made by an audit:
//! - Building the shared HTTP client with the configured identity and timeout
//! - Following redirect chains by hand so every hop's status is visible
//! - Fetching seed page content

use crate::config::Config;
use crate::{LinkCheckError, PageError};
use reqwest::header::{LOCATION, USER_AGENT};
use reqwest::{redirect::Policy, Client, Response, StatusCode};
use std::collections::HashSet;
use url::Url;

/// One redirect response in a chain
#[derive(Debug, Clone)]
pub struct RedirectHop {
    /// URL that answered with the redirect
    pub url: Url,

    /// Redirect status (301, 302, 303, 307 or 308)
    pub status: StatusCode,
}

/// Result of following a URL to its final response
#[derive(Debug)]
pub struct RedirectChain {
    /// Redirect responses in the order they were received
    pub hops: Vec<RedirectHop>,

    /// The first non-redirect response
    pub response: Response,
}

impl RedirectChain {
    /// URL of the final response
    pub fn final_url(&self) -> &Url {
        self.response.url()
    }
}

/// A fetched seed page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL the page was requested with
    pub url: Url,

    /// URL the content was served from after redirects
    pub final_url: Url,

    /// HTTP status code of the final response (not necessarily 2xx)
    pub status_code: u16,

    /// Page body content
    pub body: String,
}

/// Builds the HTTP client shared by every request of an audit
///
/// Automatic redirects are disabled; [`follow_redirects`] walks the chain so
/// the status of the first hop can be reported.
///
/// # Example
///
/// ```no_run
/// use link_audit::config::Config;
/// use link_audit::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.page.as_str())
        .timeout(config.crawler.request_timeout())
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true for statuses that carry a `Location` to follow
fn is_redirect_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

/// Extracts the redirect target of a response, if it is a redirect
///
/// A redirect status without a `Location` header is treated as a final
/// response.
fn redirect_location(response: &Response) -> Result<Option<String>, LinkCheckError> {
    if !is_redirect_status(response.status()) {
        return Ok(None);
    }

    match response.headers().get(LOCATION) {
        Some(value) => value
            .to_str()
            .map(|s| Some(s.to_string()))
            .map_err(|_| LinkCheckError::InvalidLocation {
                location: String::from_utf8_lossy(value.as_bytes()).into_owned(),
            }),
        None => Ok(None),
    }
}

/// Requests a URL and follows its redirect chain
///
/// # Chain Rules
///
/// | Condition | Result |
/// |-----------|--------|
/// | 301/302/303/307/308 with `Location` | Hop recorded, location followed |
/// | Any other response | Chain ends |
/// | More than `max_redirects` hops | `TooManyRedirects` |
/// | Location already visited | `RedirectLoop` |
/// | Location cannot be resolved | `InvalidLocation` |
/// | Transport failure or timeout | `Http` |
///
/// `user_agent` overrides the client's identity header on every hop.
pub async fn follow_redirects(
    client: &Client,
    url: &Url,
    max_redirects: u32,
    user_agent: Option<&str>,
) -> Result<RedirectChain, LinkCheckError> {
    let mut hops = Vec::new();
    let mut visited = HashSet::new();
    let mut current = url.clone();
    visited.insert(current.clone());

    loop {
        let mut request = client.get(current.clone());
        if let Some(agent) = user_agent {
            request = request.header(USER_AGENT, agent);
        }
        let response = request.send().await?;

        let location = match redirect_location(&response)? {
            Some(location) => location,
            None => return Ok(RedirectChain { hops, response }),
        };

        if hops.len() >= max_redirects as usize {
            return Err(LinkCheckError::TooManyRedirects {
                limit: max_redirects,
            });
        }

        let next = current
            .join(&location)
            .map_err(|_| LinkCheckError::InvalidLocation {
                location: location.clone(),
            })?;

        if !visited.insert(next.clone()) {
            return Err(LinkCheckError::RedirectLoop {
                url: next.to_string(),
            });
        }

        tracing::trace!("{} {} -> {}", response.status().as_u16(), current, next);

        hops.push(RedirectHop {
            url: current,
            status: response.status(),
        });
        current = next;
    }
}

/// Fetches a seed page's content
///
/// Redirects are followed. The body is returned whatever the final status is:
/// error pages that still render content get their links audited. Only a
/// failure while walking the chain or reading the body is an error.
pub async fn fetch_page(
    client: &Client,
    url: &Url,
    max_redirects: u32,
) -> Result<FetchedPage, PageError> {
    let chain = follow_redirects(client, url, max_redirects, None)
        .await
        .map_err(|e| match e {
            LinkCheckError::Http(source) => PageError::Http {
                url: url.to_string(),
                source,
            },
            other => PageError::Redirect {
                url: url.to_string(),
                source: other,
            },
        })?;

    let status = chain.response.status();
    let final_url = chain.final_url().clone();
    let body = chain.response.text().await.map_err(|e| PageError::Body {
        url: url.to_string(),
        source: e,
    })?;

    Ok(FetchedPage {
        url: url.clone(),
        final_url,
        status_code: status.as_u16(),
        body,
    })
}
