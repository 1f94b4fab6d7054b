//! Cursor-paginated comment fetching.
//!
//! Instagram returns comments as pages of two-level threads (a top-level
//! comment plus its direct replies). `CommentTreeFetcher` walks the pages in
//! order and flattens every thread into a single `Comment` list, tagging each
//! reply with the author of the top-level comment it sits under.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::debug;

use super::error::{InstagramError, Result};
use super::models::{Comment, CommentPage, CommentThread};

/// Comments requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Minimum delay between successive page requests, in milliseconds.
/// Instagram rate-limits aggressively and bans sessions that page too fast,
/// so this throttle must never be removed or parallelized away.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 500;

/// Upper bound on pages fetched in one call. At the default page size this
/// allows 100,000 top-level comments, far beyond any real post; hitting it
/// means the upstream pagination metadata is broken.
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Flag checked between page requests; raise it to abort a running fetch.
pub type CancelFlag = Arc<AtomicBool>;

/// One query against the comments connection of a post.
///
/// `cursor` is the opaque continuation token from the previous page's
/// metadata, absent on the first request.
#[async_trait::async_trait]
pub trait CommentPager: Send + Sync {
    async fn fetch_page(
        &self,
        shortcode: &str,
        page_size: u32,
        cursor: Option<&str>,
    ) -> Result<CommentPage>;
}

/// Fetches every comment on a post, one page at a time.
pub struct CommentTreeFetcher<P> {
    pager: P,
    page_size: u32,
    request_delay: Duration,
    max_pages: u32,
    cancel: Option<CancelFlag>,
}

impl<P: CommentPager> CommentTreeFetcher<P> {
    pub fn new(pager: P) -> Self {
        Self {
            pager,
            page_size: DEFAULT_PAGE_SIZE,
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            max_pages: DEFAULT_MAX_PAGES,
            cancel: None,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_request_delay(mut self, request_delay: Duration) -> Self {
        self.request_delay = request_delay;
        self
    }

    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Check `cancel` between pages and abort with
    /// [`InstagramError::Cancelled`] once it is raised. Without a flag the
    /// fetch runs to completion unattended.
    #[must_use]
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Fetch every top-level comment and reply on the post, flattened in
    /// page order.
    ///
    /// Any transport or parse failure aborts the whole fetch; partially
    /// collected comments are never returned.
    pub async fn fetch_all(&self, shortcode: &str) -> Result<Vec<Comment>> {
        let mut comments = Vec::new();
        let mut cursor: Option<String> = None;

        for page_index in 0..self.max_pages {
            if self.is_cancelled() {
                return Err(InstagramError::Cancelled);
            }
            if page_index > 0 {
                tokio::time::sleep(self.request_delay).await;
            }

            let page = self
                .pager
                .fetch_page(shortcode, self.page_size, cursor.as_deref())
                .await?;

            for thread in page.threads {
                flatten_thread(thread, &mut comments);
            }
            debug!(
                page = page_index + 1,
                total = comments.len(),
                "fetched comment page"
            );

            if !page.page_info.has_next_page {
                return Ok(comments);
            }

            let next = page.page_info.end_cursor.ok_or_else(|| {
                InstagramError::Parse("has_next_page is set but end_cursor is missing".to_string())
            })?;
            if cursor.as_deref() == Some(next.as_str()) {
                return Err(InstagramError::Parse(format!(
                    "pagination cursor did not advance past {next:?}"
                )));
            }
            cursor = Some(next);
        }

        Err(InstagramError::PageLimit(self.max_pages))
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Append a thread's top-level comment, then each of its replies in order.
/// Replies always point at the thread author: the API nests one level only.
fn flatten_thread(thread: CommentThread, out: &mut Vec<Comment>) {
    let CommentThread {
        author,
        text,
        replies,
    } = thread;

    out.push(Comment {
        author: author.clone(),
        text,
        replied_to: None,
    });
    for reply in replies {
        out.push(Comment {
            author: reply.author,
            text: reply.text,
            replied_to: Some(author.clone()),
        });
    }
}
