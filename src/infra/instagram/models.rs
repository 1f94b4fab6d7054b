//! Domain types for fetched comments.
//!
//! Instagram nests replies exactly one level deep, so a thread is modeled as
//! two concrete shapes (`CommentThread` and `Reply`) rather than a recursive
//! type.

use serde::Serialize;

/// One flattened comment, as handed to the export stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub author: String,
    pub text: String,
    /// `None` for a top-level comment; for a reply, the author of the
    /// top-level comment it is nested under.
    pub replied_to: Option<String>,
}

/// A top-level comment together with its nested replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    pub author: String,
    pub text: String,
    pub replies: Vec<Reply>,
}

/// A reply nested under a top-level comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub author: String,
    pub text: String,
}

/// One page of comment threads plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPage {
    pub threads: Vec<CommentThread>,
    pub page_info: PageInfo,
}

/// Continuation metadata returned with every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[allow(dead_code)]
impl CommentThread {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            replies: Vec::new(),
        }
    }

    pub fn with_reply(mut self, author: impl Into<String>, text: impl Into<String>) -> Self {
        self.replies.push(Reply {
            author: author.into(),
            text: text.into(),
        });
        self
    }
}
