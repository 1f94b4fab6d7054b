//! wiremock-based Instagram mock server for tests.
//!
//! Serves canned GraphQL comment pages to a [`GraphqlClient`] pointed at the
//! local server. Page fixtures are built with [`page_body`] and
//! [`comment_edge`].
//!
//! Mock matching is first-mounted-wins, so mount cursor-specific pages
//! (`mock_page_after`) before the catch-all first page (`mock_first_page`)
//! when a test paginates.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_contains};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::client::{GraphqlClient, POST_QUERY_HASH};
use super::credentials::Credentials;

pub struct InstagramMockServer {
    server: MockServer,
}

impl InstagramMockServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// The credentials every mock client is built with.
    pub fn credentials() -> Credentials {
        Credentials::new("s3ssion", "12345678", "m1d", "csrf-t0ken")
    }

    /// A client pointed at this mock server.
    pub fn client(&self) -> GraphqlClient {
        GraphqlClient::new(Self::credentials()).with_base_url(self.server.uri())
    }

    /// Serve `body` for a comments query on `shortcode`, expected once.
    pub async fn mock_first_page(&self, shortcode: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/graphql/query/"))
            .and(query_param("query_hash", POST_QUERY_HASH))
            .and(query_param_contains(
                "variables",
                format!("\"shortcode\":\"{shortcode}\""),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Like [`Self::mock_first_page`], additionally requiring the session
    /// cookie header and app ID instagram.com expects.
    pub async fn mock_first_page_expecting_headers(
        &self,
        shortcode: &str,
        body: serde_json::Value,
    ) {
        Mock::given(method("GET"))
            .and(path("/graphql/query/"))
            .and(query_param("query_hash", POST_QUERY_HASH))
            .and(query_param_contains(
                "variables",
                format!("\"shortcode\":\"{shortcode}\""),
            ))
            .and(header("Cookie", Self::credentials().cookie_header()))
            .and(header("X-IG-App-ID", "936619743392459"))
            .and(header("X-Requested-With", "XMLHttpRequest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Serve `body` for the page request continuing from `cursor`.
    pub async fn mock_page_after(&self, cursor: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/graphql/query/"))
            .and(query_param("query_hash", POST_QUERY_HASH))
            .and(query_param_contains(
                "variables",
                format!("\"after\":\"{cursor}\""),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answer every comments query with the given HTTP status.
    pub async fn mock_error(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/graphql/query/"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }
}

/// JSON body of one comments page.
pub fn page_body(
    edges: &[serde_json::Value],
    has_next_page: bool,
    end_cursor: Option<&str>,
) -> serde_json::Value {
    json!({
        "data": {
            "shortcode_media": {
                "edge_media_to_parent_comment": {
                    "edges": edges,
                    "page_info": {
                        "has_next_page": has_next_page,
                        "end_cursor": end_cursor,
                    }
                }
            }
        }
    })
}

/// One top-level comment edge with its nested replies.
pub fn comment_edge(author: &str, text: &str, replies: &[(&str, &str)]) -> serde_json::Value {
    let reply_edges: Vec<serde_json::Value> = replies
        .iter()
        .map(|(author, text)| {
            json!({ "node": { "owner": { "username": author }, "text": text } })
        })
        .collect();

    json!({
        "node": {
            "owner": { "username": author },
            "text": text,
            "edge_threaded_comments": { "edges": reply_edges },
        }
    })
}
