//! forge::traits
//!
//! Transport seam between the changelog engine and a remote hosting service.
//!
//! # Design
//!
//! The engine never talks HTTP directly. It asks a [`PageSource`] for one
//! page of a collection endpoint at a time and receives the raw body plus the
//! `Link` header. Pagination, decoding and filtering all live above this
//! trait, so the same engine runs against GitHub or the in-memory
//! [`MockForge`](super::mock::MockForge).
//!
//! All methods return `Result`; there is no retry anywhere. A failed request
//! aborts the run.
//!
//! # Example
//!
//! ```ignore
//! use quarterlog::forge::{PageSource, ForgeError};
//!
//! async fn first_page(source: &dyn PageSource, url: &str) -> Result<usize, ForgeError> {
//!     let page = source.get_page(url).await?;
//!     Ok(page.body.len())
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

/// Errors from forge operations.
///
/// Every variant is fatal to a changelog run.
#[derive(Debug, Clone, Error)]
pub enum ForgeError {
    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// A page body could not be decoded into the expected records.
    #[error("failed to decode {what}: {message}")]
    Decode {
        /// What was being decoded (e.g. "pull request page")
        what: String,
        /// Decoder error message
        message: String,
    },
}

/// One page of a collection endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Raw response body
    pub body: Vec<u8>,
    /// Value of the `Link` response header, if any
    pub link: Option<String>,
}

impl Page {
    /// Create a page with a body and optional `Link` header.
    pub fn new(body: impl Into<Vec<u8>>, link: Option<&str>) -> Self {
        Self {
            body: body.into(),
            link: link.map(str::to_string),
        }
    }
}

/// Source of raw collection pages.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so they can be shared behind a
/// reference across `.await` points.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Get the source name (e.g., "github", "mock").
    fn name(&self) -> &'static str;

    /// Fetch a single page.
    ///
    /// # Errors
    ///
    /// - `NetworkError` if the request could not be sent or the body read
    /// - `AuthFailed`, `NotFound`, `RateLimited`, `ApiError` for non-2xx
    ///   responses
    async fn get_page(&self, url: &str) -> Result<Page, ForgeError>;
}

/// Decode a JSON page body, mapping failures to [`ForgeError::Decode`].
pub fn decode_page<T: serde::de::DeserializeOwned>(
    body: &[u8],
    what: &str,
) -> Result<T, ForgeError> {
    serde_json::from_slice(body).map_err(|e| ForgeError::Decode {
        what: what.to_string(),
        message: e.to_string(),
    })
}
