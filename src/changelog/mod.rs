//! changelog
//!
//! Retrieval and reconciliation of a quarter's changes.
//!
//! # Architecture
//!
//! A run is two sequential passes over the forge followed by a merge:
//!
//! 1. [`pulls`] walks closed pull requests and emits one entry per PR merged
//!    in the window, recording each merge sha.
//! 2. [`commits`] walks the window's commit history, skipping recorded shas
//!    and any commit the host links to a pull request.
//! 3. [`aggregate`] sorts both entry lists by date and renders them.
//!
//! All run state (the seen-sha set, the entry lists) is owned by [`generate`]
//! and passed explicitly between the passes. Nothing is written until both
//! passes succeed; persisting the result is the caller's job (see
//! [`output::write_atomic`]).
//!
//! # Example
//!
//! ```ignore
//! use quarterlog::changelog::{generate, LinkStyle};
//! use quarterlog::core::window::Window;
//! use chrono::Utc;
//! use quarterlog::forge::{github::GitHubForge, RepoEndpoints};
//!
//! let forge = GitHubForge::new(None);
//! let endpoints = RepoEndpoints::new("https://api.github.com", "octocat/hello".parse()?);
//! let report = generate(&forge, &endpoints, &Window::preceding(Utc::now().date_naive())?, LinkStyle::Plain).await?;
//! print!("{}", report.render());
//! ```

pub mod aggregate;
pub mod commits;
mod entry;
pub mod output;
pub mod pulls;

pub use entry::{ChangelogEntry, LinkStyle};
pub use pulls::SeenShas;

use tracing::info;

use crate::core::window::Window;
use crate::forge::{Diagnostic, ForgeError, PageSource, RepoEndpoints};

/// Outcome of a successful run.
#[derive(Debug)]
pub struct RunReport {
    /// Window the run covered
    pub window: Window,
    /// All entries, ascending by date
    pub entries: Vec<ChangelogEntry>,
    /// Pagination anomalies encountered along the way
    pub diagnostics: Vec<Diagnostic>,
    /// Entries contributed by the pull request pass
    pub pull_request_entries: usize,
    /// Entries contributed by the commit pass
    pub commit_entries: usize,
    /// Commits skipped because the host links them to a pull request
    pub commits_with_pulls: usize,
}

impl RunReport {
    /// The changelog text.
    pub fn render(&self) -> String {
        aggregate::render(&self.entries)
    }
}

/// Run both passes for `window` and merge their entries.
///
/// # Errors
///
/// Any transport or decode error aborts the run; no partial report is
/// returned.
pub async fn generate(
    source: &dyn PageSource,
    endpoints: &RepoEndpoints,
    window: &Window,
    style: LinkStyle,
) -> Result<RunReport, ForgeError> {
    info!(
        repo = %endpoints.repo(),
        source = source.name(),
        window = %window,
        "generating changelog"
    );

    let pulls = pulls::collect_pull_requests(source, endpoints, window, style).await?;
    let commits =
        commits::reconcile_commits(source, endpoints, window, &pulls.seen, style).await?;

    let pull_request_entries = pulls.entries.len();
    let commit_entries = commits.entries.len();
    let diagnostics = pulls
        .diagnostic
        .into_iter()
        .chain(commits.diagnostic)
        .collect();

    Ok(RunReport {
        window: *window,
        entries: aggregate::aggregate(pulls.entries, commits.entries),
        diagnostics,
        pull_request_entries,
        commit_entries,
        commits_with_pulls: commits.with_pulls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::window::Quarter;
    use crate::forge::mock::MockForge;
    use serde_json::json;

    #[tokio::test]
    async fn merge_commit_of_collected_pr_is_not_listed_twice() {
        let window = Quarter::new(2024, 2).unwrap().window().unwrap();
        let endpoints = RepoEndpoints::new("https://api.test", "o/r".parse().unwrap());
        let forge = MockForge::new()
            .with_json(
                endpoints.closed_pulls(),
                json!([{
                    "number": 42,
                    "title": "Fix bug",
                    "html_url": "https://github.com/o/r/pull/42",
                    "merge_commit_sha": "abc1234",
                    "merged_at": "2024-05-02T00:00:00Z"
                }]),
            )
            .with_json(
                endpoints.commits_in(&window),
                json!([
                    {
                        "sha": "abc1234",
                        "html_url": "https://github.com/o/r/commit/abc1234",
                        "commit": {"message": "Fix bug (#42)", "committer": {"date": "2024-05-02T00:00:00Z"}}
                    },
                    {
                        "sha": "0123456789",
                        "html_url": "https://github.com/o/r/commit/0123456789",
                        "commit": {"message": "Bump version", "committer": {"date": "2024-04-10T00:00:00Z"}}
                    }
                ]),
            )
            .with_json(endpoints.commit_pulls("0123456789"), json!([]));

        let report = generate(&forge, &endpoints, &window, LinkStyle::Plain)
            .await
            .unwrap();

        assert_eq!(report.pull_request_entries, 1);
        assert_eq!(report.commit_entries, 1);
        assert_eq!(
            report.render(),
            "- Bump version ([commit 0123456](https://github.com/o/r/commit/0123456789))\n\n\
             - Fix bug ([#42](https://github.com/o/r/pull/42))\n\n"
        );
        assert_eq!(report.diagnostics.len(), 2);
    }

    #[tokio::test]
    async fn pull_request_failure_aborts_before_commits() {
        let window = Quarter::new(2024, 2).unwrap().window().unwrap();
        let endpoints = RepoEndpoints::new("https://api.test", "o/r".parse().unwrap());
        let forge =
            MockForge::new().fail_on(endpoints.closed_pulls(), ForgeError::RateLimited);

        let result = generate(&forge, &endpoints, &window, LinkStyle::Plain).await;
        assert!(matches!(result, Err(ForgeError::RateLimited)));
        assert_eq!(forge.request_count(&endpoints.commits_in(&window)), 0);
    }
}
