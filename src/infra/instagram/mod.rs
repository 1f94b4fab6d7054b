//! Instagram comment fetching.
//!
//! `CommentTreeFetcher` drives the paginated fetch over a `CommentPager`
//! transport; `GraphqlClient` is the production transport, authenticated with
//! opaque session cookies.

mod client;
mod comments;
mod credentials;
mod error;
#[cfg(test)]
mod mock;
mod models;
mod shortcode;

pub use client::GraphqlClient;
pub use comments::{
    CancelFlag, CommentPager, CommentTreeFetcher, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE,
    DEFAULT_REQUEST_DELAY_MS,
};
pub use credentials::Credentials;
pub use error::InstagramError;
#[cfg(test)]
pub use mock::{InstagramMockServer, comment_edge, page_body};
pub use models::Comment;
pub use shortcode::extract_shortcode;
