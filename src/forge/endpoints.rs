//! forge::endpoints
//!
//! URLs for the three collection endpoints the changelog reads.

use chrono::SecondsFormat;

use crate::core::types::RepoSlug;
use crate::core::window::Window;

/// Endpoint builder for one repository.
///
/// # Example
///
/// ```
/// use quarterlog::core::types::RepoSlug;
/// use quarterlog::forge::RepoEndpoints;
///
/// let slug: RepoSlug = "octocat/hello".parse().unwrap();
/// let endpoints = RepoEndpoints::new("https://api.github.com", slug);
/// assert_eq!(
///     endpoints.closed_pulls(),
///     "https://api.github.com/repos/octocat/hello/pulls?state=closed"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEndpoints {
    api_base: String,
    repo: RepoSlug,
}

impl RepoEndpoints {
    pub fn new(api_base: impl Into<String>, repo: RepoSlug) -> Self {
        let api_base: String = api_base.into();
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            repo,
        }
    }

    pub fn repo(&self) -> &RepoSlug {
        &self.repo
    }

    /// Build URL for a repository endpoint.
    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base,
            self.repo.owner(),
            self.repo.name(),
            path
        )
    }

    /// Closed pull requests, host default ordering.
    pub fn closed_pulls(&self) -> String {
        self.repo_url("pulls?state=closed")
    }

    /// Commit history filtered to the window.
    pub fn commits_in(&self, window: &Window) -> String {
        self.repo_url(&format!(
            "commits?since={}&until={}",
            window.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            window.end.to_rfc3339_opts(SecondsFormat::Secs, true)
        ))
    }

    /// Pull requests associated with a single commit.
    pub fn commit_pulls(&self, sha: &str) -> String {
        self.repo_url(&format!("commits/{}/pulls", sha))
    }
}
