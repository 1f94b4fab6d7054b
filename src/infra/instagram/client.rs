//! GraphQL transport for the comments connection.
//!
//! Mirrors the requests instagram.com's own web client issues: a GET against
//! `/graphql/query/` with a fixed query hash and a percent-encoded JSON
//! `variables` parameter, authenticated purely through session cookies.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;

use super::comments::CommentPager;
use super::credentials::Credentials;
use super::error::{InstagramError, Result};
use super::models::{CommentPage, CommentThread, PageInfo, Reply};

/// Query hash of the `edge_media_to_parent_comment` GraphQL document.
pub const POST_QUERY_HASH: &str = "97b41c52301f77ce508f55e66d17620e";

/// App ID instagram.com's web client identifies itself with.
const IG_APP_ID: &str = "936619743392459";

const DEFAULT_BASE_URL: &str = "https://www.instagram.com";

/// Production [`CommentPager`] backed by reqwest.
pub struct GraphqlClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl GraphqlClient {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials,
        }
    }

    /// Point the client at a different endpoint, for tests against a local
    /// mock server.
    #[cfg(test)]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait::async_trait]
impl CommentPager for GraphqlClient {
    async fn fetch_page(
        &self,
        shortcode: &str,
        page_size: u32,
        cursor: Option<&str>,
    ) -> Result<CommentPage> {
        let variables = build_variables(shortcode, page_size, cursor);
        let url = format!(
            "{}/graphql/query/?query_hash={}&variables={}",
            self.base_url,
            POST_QUERY_HASH,
            utf8_percent_encode(&variables, NON_ALPHANUMERIC),
        );

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, "Mozilla/5.0")
            .header(reqwest::header::ACCEPT, "*/*")
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header("X-Requested-With", "XMLHttpRequest")
            .header("X-IG-App-ID", IG_APP_ID)
            .header(
                reqwest::header::REFERER,
                format!("{DEFAULT_BASE_URL}/p/{shortcode}/"),
            )
            .header(reqwest::header::COOKIE, self.credentials.cookie_header())
            .send()
            .await
            .map_err(|e| InstagramError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InstagramError::Transport(format!(
                "HTTP {status} from Instagram"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| InstagramError::Transport(e.to_string()))?;
        let decoded: QueryResponse =
            serde_json::from_slice(&body).map_err(|e| InstagramError::Parse(e.to_string()))?;
        decoded.into_page()
    }
}

/// Compact-JSON `variables` value, `after` only present when paginating.
fn build_variables(shortcode: &str, page_size: u32, cursor: Option<&str>) -> String {
    let mut variables = serde_json::json!({
        "shortcode": shortcode,
        "first": page_size,
    });
    if let Some(cursor) = cursor {
        variables["after"] = serde_json::Value::String(cursor.to_owned());
    }
    variables.to_string()
}

// Response shape as served by Instagram. Everything above the comments
// connection is nullable: an unknown shortcode comes back as `data` with a
// null `shortcode_media`, not as an HTTP error.

#[derive(Debug, Deserialize)]
struct QueryResponse {
    data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    shortcode_media: Option<ShortcodeMedia>,
}

#[derive(Debug, Deserialize)]
struct ShortcodeMedia {
    edge_media_to_parent_comment: CommentConnection,
}

#[derive(Debug, Deserialize)]
struct CommentConnection {
    edges: Vec<CommentEdge>,
    page_info: RawPageInfo,
}

#[derive(Debug, Deserialize)]
struct CommentEdge {
    node: CommentNode,
}

#[derive(Debug, Deserialize)]
struct CommentNode {
    owner: Owner,
    text: String,
    edge_threaded_comments: Option<ReplyConnection>,
}

#[derive(Debug, Deserialize)]
struct Owner {
    username: String,
}

#[derive(Debug, Deserialize)]
struct ReplyConnection {
    edges: Vec<ReplyEdge>,
}

#[derive(Debug, Deserialize)]
struct ReplyEdge {
    node: ReplyNode,
}

#[derive(Debug, Deserialize)]
struct ReplyNode {
    owner: Owner,
    text: String,
}

#[derive(Debug, Deserialize)]
struct RawPageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

impl QueryResponse {
    fn into_page(self) -> Result<CommentPage> {
        let media = self
            .data
            .and_then(|data| data.shortcode_media)
            .ok_or_else(|| InstagramError::Parse("post not found in response".to_string()))?;

        let connection = media.edge_media_to_parent_comment;
        let threads = connection
            .edges
            .into_iter()
            .map(|edge| into_thread(edge.node))
            .collect();

        Ok(CommentPage {
            threads,
            page_info: PageInfo {
                has_next_page: connection.page_info.has_next_page,
                end_cursor: connection.page_info.end_cursor,
            },
        })
    }
}

fn into_thread(node: CommentNode) -> CommentThread {
    CommentThread {
        author: node.owner.username,
        text: node.text,
        replies: node
            .edge_threaded_comments
            .map(|connection| {
                connection
                    .edges
                    .into_iter()
                    .map(|edge| Reply {
                        author: edge.node.owner.username,
                        text: edge.node.text,
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}
