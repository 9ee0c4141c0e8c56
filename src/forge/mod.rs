//! forge
//!
//! Read-only access to a remote hosting service's REST API.
//!
//! # Architecture
//!
//! The changelog engine depends on the [`PageSource`] trait only. Concrete
//! sources are [`github::GitHubForge`] for real runs and [`mock::MockForge`]
//! for tests.
//!
//! # Modules
//!
//! - `traits`: `PageSource`, `Page` and `ForgeError`
//! - [`pagination`]: `Link`-header walking with a page cap
//! - `endpoints`: URL builders for the consumed endpoints
//! - `records`: decoded pull request and commit records
//! - [`github`]: GitHub implementation using the REST API
//! - [`mock`]: Mock implementation for deterministic testing
//!
//! # Example
//!
//! ```ignore
//! use quarterlog::forge::{fetch_pages, github::GitHubForge, RepoEndpoints};
//!
//! let forge = GitHubForge::new(None);
//! let endpoints = RepoEndpoints::new("https://api.github.com", "octocat/hello".parse()?);
//! fetch_pages(&forge, &endpoints.closed_pulls(), |body| {
//!     println!("{} bytes", body.len());
//!     Ok(true)
//! })
//! .await?;
//! ```

mod endpoints;
pub mod github;
pub mod mock;
pub mod pagination;
mod records;
mod traits;

pub use endpoints::RepoEndpoints;
pub use pagination::{fetch_pages, parse_next_link, Diagnostic, Pages, PaginationStop, MAX_PAGES};
pub use records::{CommitRecord, PullRequestRecord};
pub use traits::*;
