//! forge::pagination
//!
//! Page-by-page walking of a collection endpoint via the `Link` header.
//!
//! # Protocol
//!
//! After each page the `Link` header is split on `>; rel="next"`. Exactly two
//! segments must result; the next URL is whatever follows the last `<` in the
//! first segment. Anything else ends the walk with a diagnostic.
//!
//! A walk fetches at most [`MAX_PAGES`] pages. Hitting the cap is also a
//! diagnostic rather than an error, since it usually means the next-link
//! parsing has gone wrong.
//!
//! # Consumers
//!
//! - [`fetch_pages`] drives a synchronous closure that returns whether to
//!   keep going.
//! - [`Pages`] is a cursor for consumers that need to issue their own requests
//!   while holding a page (the commit pass does this).

use std::fmt;

use tracing::{debug, warn};

use super::traits::{ForgeError, PageSource};

/// Upper bound on pages fetched in a single walk.
pub const MAX_PAGES: usize = 20;

const NEXT_MARKER: &str = ">; rel=\"next\"";

/// Why a walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationStop {
    /// The consumer asked to stop.
    Stopped,
    /// No `Link` header, or one without a `rel="next"` entry.
    NoNextLink {
        /// Raw header value, if one was present
        header: Option<String>,
    },
    /// A `rel="next"` marker with no opening `<` before it.
    MalformedNextLink {
        /// Raw header value
        header: String,
    },
    /// [`MAX_PAGES`] pages were fetched and another was available.
    PageCap,
}

impl PaginationStop {
    /// Whether this stop should be surfaced as a diagnostic.
    pub fn is_diagnostic(&self) -> bool {
        !matches!(self, PaginationStop::Stopped)
    }
}

impl fmt::Display for PaginationStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaginationStop::Stopped => write!(f, "stopped by consumer"),
            PaginationStop::NoNextLink { header: None } => write!(f, "no next link"),
            PaginationStop::NoNextLink {
                header: Some(header),
            } => write!(f, "no next link in '{}'", header),
            PaginationStop::MalformedNextLink { header } => {
                write!(f, "no starting link in '{}'", header)
            }
            PaginationStop::PageCap => write!(f, "too many pages (limit {})", MAX_PAGES),
        }
    }
}

/// A pagination anomaly recorded against the walk that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// URL the walk started from
    pub url: String,
    /// Why the walk ended
    pub reason: PaginationStop,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.url, self.reason)
    }
}

/// Extract the `rel="next"` URL from a `Link` header value.
///
/// # Example
///
/// ```
/// use quarterlog::forge::parse_next_link;
///
/// let header = r#"<https://api.github.com/x?page=2>; rel="next", <https://api.github.com/x?page=9>; rel="last""#;
/// assert_eq!(
///     parse_next_link(Some(header)).unwrap(),
///     "https://api.github.com/x?page=2"
/// );
/// assert!(parse_next_link(None).is_err());
/// ```
pub fn parse_next_link(header: Option<&str>) -> Result<String, PaginationStop> {
    let raw = header.unwrap_or("");
    let segments: Vec<&str> = raw.split(NEXT_MARKER).collect();
    if segments.len() != 2 {
        return Err(PaginationStop::NoNextLink {
            header: header.map(str::to_string),
        });
    }

    match segments[0].rsplit_once('<') {
        Some((_, url)) => Ok(url.to_string()),
        None => Err(PaginationStop::MalformedNextLink {
            header: raw.to_string(),
        }),
    }
}

/// Cursor over the pages of one collection endpoint.
///
/// Each call to [`next_page`](Pages::next_page) performs at most one request.
/// Dropping the cursor (or calling [`stop`](Pages::stop)) ends the walk without
/// inspecting the last page's `Link` header.
pub struct Pages<'a> {
    source: &'a dyn PageSource,
    start_url: String,
    next: Option<Result<String, PaginationStop>>,
    fetched: usize,
    stop: Option<PaginationStop>,
}

impl<'a> Pages<'a> {
    /// Start a walk at `url`. No request is made until the first `next_page`.
    pub fn new(source: &'a dyn PageSource, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            source,
            start_url: url.clone(),
            next: Some(Ok(url)),
            fetched: 0,
            stop: None,
        }
    }

    /// Fetch the next page body, or `None` once the walk has ended.
    ///
    /// # Errors
    ///
    /// Propagates any transport error from the page source.
    pub async fn next_page(&mut self) -> Result<Option<Vec<u8>>, ForgeError> {
        let url = match self.next.take() {
            None => return Ok(None),
            Some(Err(reason)) => {
                self.finish(reason);
                return Ok(None);
            }
            Some(Ok(url)) => url,
        };

        if self.fetched >= MAX_PAGES {
            self.finish(PaginationStop::PageCap);
            return Ok(None);
        }

        debug!(url = %url, page = self.fetched + 1, "fetching page");
        let page = self.source.get_page(&url).await?;
        self.fetched += 1;
        self.next = Some(parse_next_link(page.link.as_deref()));

        Ok(Some(page.body))
    }

    /// End the walk at the consumer's request.
    pub fn stop(&mut self) {
        self.next = None;
        if self.stop.is_none() {
            self.stop = Some(PaginationStop::Stopped);
        }
    }

    /// Number of pages fetched so far.
    pub fn fetched(&self) -> usize {
        self.fetched
    }

    /// Why the walk ended, if it has.
    pub fn stop_reason(&self) -> Option<&PaginationStop> {
        self.stop.as_ref()
    }

    /// The diagnostic for this walk, if it ended on an anomaly.
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        self.stop
            .as_ref()
            .filter(|reason| reason.is_diagnostic())
            .map(|reason| Diagnostic {
                url: self.start_url.clone(),
                reason: reason.clone(),
            })
    }

    fn finish(&mut self, reason: PaginationStop) {
        match reason {
            // The last page of every listing has no next link.
            PaginationStop::Stopped | PaginationStop::NoNextLink { .. } => {
                debug!(url = %self.start_url, pages = self.fetched, "pagination ended: {}", reason);
            }
            PaginationStop::MalformedNextLink { .. } | PaginationStop::PageCap => {
                warn!(url = %self.start_url, pages = self.fetched, "pagination ended: {}", reason);
            }
        }
        self.next = None;
        self.stop = Some(reason);
    }
}

/// Walk every page of `url`, handing each body to `on_page`.
///
/// The walk ends when `on_page` returns `Ok(false)`, when there is no usable
/// next link, or when [`MAX_PAGES`] is reached. The returned diagnostic is
/// `Some` only for the last two cases.
///
/// # Errors
///
/// Transport errors and any error returned by `on_page` abort the walk.
pub async fn fetch_pages<F>(
    source: &dyn PageSource,
    url: &str,
    mut on_page: F,
) -> Result<Option<Diagnostic>, ForgeError>
where
    F: FnMut(&[u8]) -> Result<bool, ForgeError>,
{
    let mut pages = Pages::new(source, url);
    while let Some(body) = pages.next_page().await? {
        if !on_page(&body)? {
            pages.stop();
            break;
        }
    }
    Ok(pages.diagnostic())
}
