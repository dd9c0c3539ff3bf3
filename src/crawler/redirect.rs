//! Link status resolution
//!
//! Each link is requested once and its redirect chain is followed. What gets
//! reported is the status of the *first* response: a `301` that ends on a
//! `200` is still a finding, because the redirect hop itself is what the
//! audit is meant to surface.

use crate::crawler::fetcher::follow_redirects;
use crate::crawler::parser::Anchor;
use crate::report::{Destination, Finding, LinkStatus};
use crate::LinkCheckError;
use reqwest::Client;
use url::Url;

/// Outcome of checking one link
#[derive(Debug)]
pub enum LinkCheck {
    /// The link answered without any redirect
    Direct { status: u16 },

    /// The link redirected at least once
    Redirected {
        /// Status of the first redirect response
        initial_status: u16,
        /// URL of the final response
        final_url: Url,
        /// Status of the final response
        final_status: u16,
    },

    /// The request or the redirect chain failed
    Failed(LinkCheckError),
}

impl LinkCheck {
    /// Status reported for this link
    pub fn status(&self) -> LinkStatus {
        match self {
            Self::Direct { status } => LinkStatus::Code(*status),
            Self::Redirected { initial_status, .. } => LinkStatus::Code(*initial_status),
            Self::Failed(_) => LinkStatus::Error,
        }
    }

    /// Destination reported for this link
    pub fn destination(&self) -> Destination {
        match self {
            Self::Direct { .. } => Destination::Direct,
            Self::Redirected { final_url, .. } => Destination::Url(final_url.to_string()),
            Self::Failed(_) => Destination::NotApplicable,
        }
    }

    /// Turns the check into a report row, unless the link answered a plain 200
    pub fn into_finding(self, source_page: &str, anchor: &Anchor) -> Option<Finding> {
        let status = self.status();
        if status.is_ok() {
            return None;
        }

        Some(Finding {
            source_page: source_page.to_string(),
            anchor_text: anchor.text.clone(),
            link_url: anchor.url.to_string(),
            status,
            final_destination: self.destination(),
        })
    }
}

/// Requests a link and classifies its redirect chain
///
/// Never fails: transport errors, timeouts and broken chains become
/// [`LinkCheck::Failed`].
pub async fn resolve_link(client: &Client, url: &Url, max_redirects: u32) -> LinkCheck {
    match follow_redirects(client, url, max_redirects, None).await {
        Ok(chain) => match chain.hops.first() {
            Some(first) => LinkCheck::Redirected {
                initial_status: first.status.as_u16(),
                final_url: chain.final_url().clone(),
                final_status: chain.response.status().as_u16(),
            },
            None => LinkCheck::Direct {
                status: chain.response.status().as_u16(),
            },
        },
        Err(e) => {
            tracing::debug!("Link check failed for {}: {}", url, e);
            LinkCheck::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::crawler::build_http_client;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client() -> Client {
        build_http_client(&Config::default()).unwrap()
    }

    fn anchor(url: &str) -> Anchor {
        Anchor {
            url: Url::parse(url).unwrap(),
            text: "Read more".to_string(),
        }
    }

    async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_direct_200_produces_no_finding() {
        let server = MockServer::start().await;
        mount(&server, "/ok", ResponseTemplate::new(200)).await;

        let url = format!("{}/ok", server.uri());
        let check = resolve_link(&test_client(), &Url::parse(&url).unwrap(), 10).await;

        assert!(matches!(check, LinkCheck::Direct { status: 200 }));
        assert!(check.into_finding("https://site.test/", &anchor(&url)).is_none());
    }

    #[tokio::test]
    async fn test_direct_404_reported() {
        let server = MockServer::start().await;
        mount(&server, "/missing", ResponseTemplate::new(404)).await;

        let url = format!("{}/missing", server.uri());
        let check = resolve_link(&test_client(), &Url::parse(&url).unwrap(), 10).await;
        let finding = check
            .into_finding("https://site.test/", &anchor(&url))
            .unwrap();

        assert_eq!(finding.status, LinkStatus::Code(404));
        assert_eq!(finding.final_destination, Destination::Direct);
        assert_eq!(finding.link_url, url);
        assert_eq!(finding.source_page, "https://site.test/");
        assert_eq!(finding.anchor_text, "Read more");
    }

    #[tokio::test]
    async fn test_redirect_to_success_reports_initial_status() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/old",
            ResponseTemplate::new(301).insert_header("location", "/new"),
        )
        .await;
        mount(&server, "/new", ResponseTemplate::new(200)).await;

        let url = format!("{}/old", server.uri());
        let check = resolve_link(&test_client(), &Url::parse(&url).unwrap(), 10).await;
        let finding = check
            .into_finding("https://site.test/", &anchor(&url))
            .unwrap();

        assert_eq!(finding.status, LinkStatus::Code(301));
        assert_eq!(
            finding.final_destination,
            Destination::Url(format!("{}/new", server.uri()))
        );
    }

    #[tokio::test]
    async fn test_redirect_to_dead_link_reports_initial_status() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/old",
            ResponseTemplate::new(301).insert_header("location", "/gone"),
        )
        .await;
        mount(&server, "/gone", ResponseTemplate::new(404)).await;

        let url = format!("{}/old", server.uri());
        let check = resolve_link(&test_client(), &Url::parse(&url).unwrap(), 10).await;

        match &check {
            LinkCheck::Redirected {
                initial_status,
                final_status,
                ..
            } => {
                assert_eq!(*initial_status, 301);
                assert_eq!(*final_status, 404);
            }
            other => panic!("expected a redirect, got {:?}", other),
        }
        assert_eq!(check.status(), LinkStatus::Code(301));
    }

    #[tokio::test]
    async fn test_long_chain_within_default_limit() {
        let server = MockServer::start().await;
        for i in 0..12 {
            mount(
                &server,
                &format!("/hop{}", i),
                ResponseTemplate::new(301).insert_header("location", format!("/hop{}", i + 1).as_str()),
            )
            .await;
        }
        mount(&server, "/hop12", ResponseTemplate::new(200)).await;

        let max_redirects = Config::default().crawler.max_redirects;
        let url = format!("{}/hop0", server.uri());
        let check = resolve_link(&test_client(), &Url::parse(&url).unwrap(), max_redirects).await;

        assert_eq!(check.status(), LinkStatus::Code(301));
        assert_eq!(
            check.destination(),
            Destination::Url(format!("{}/hop12", server.uri()))
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_error_finding() {
        let url = "http://127.0.0.1:9/unreachable";
        let check = resolve_link(&test_client(), &Url::parse(url).unwrap(), 10).await;
        let finding = check.into_finding("https://site.test/", &anchor(url)).unwrap();

        assert_eq!(finding.status, LinkStatus::Error);
        assert_eq!(finding.final_destination, Destination::NotApplicable);
    }

    #[tokio::test]
    async fn test_redirect_loop_is_error_finding() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/loop",
            ResponseTemplate::new(302).insert_header("location", "/loop"),
        )
        .await;

        let url = format!("{}/loop", server.uri());
        let check = resolve_link(&test_client(), &Url::parse(&url).unwrap(), 10).await;

        assert!(matches!(check, LinkCheck::Failed(LinkCheckError::RedirectLoop { .. })));
        assert_eq!(check.destination(), Destination::NotApplicable);
    }
}
