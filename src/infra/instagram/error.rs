//! Instagram API error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstagramError {
    /// Network-level failure or non-2xx response.
    #[error("Instagram request failed: {0}")]
    Transport(String),

    /// Response JSON did not have the expected shape.
    #[error("unexpected Instagram response: {0}")]
    Parse(String),

    /// Pagination never reported completion within the configured bound.
    #[error("gave up after {0} pages: pagination did not terminate")]
    PageLimit(u32),

    /// The cancel flag was raised between page requests.
    #[error("fetch cancelled")]
    Cancelled,

    /// A required session cookie is absent from the configuration.
    #[error("missing Instagram credential: {0}")]
    MissingCredential(&'static str),
}

pub type Result<T> = std::result::Result<T, InstagramError>;
