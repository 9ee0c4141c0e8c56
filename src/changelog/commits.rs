//! changelog::commits
//!
//! Second pass: commits that no pull request accounts for.
//!
//! Commit history is filtered server-side to the window and walked in full.
//! A commit is skipped when its sha was recorded by the pull request pass, or
//! when the host reports at least one pull request associated with it. The
//! second check catches squash and rebase merges, and PRs merged outside the
//! window, whose merge sha never matches the commit listed here.

use serde::de::IgnoredAny;
use tracing::{debug, info};

use super::entry::{ChangelogEntry, LinkStyle};
use super::pulls::SeenShas;
use crate::core::window::Window;
use crate::forge::{
    decode_page, fetch_pages, CommitRecord, Diagnostic, ForgeError, PageSource, Pages,
    RepoEndpoints,
};

/// Result of the commit pass.
#[derive(Debug, Default)]
pub struct CommitPass {
    /// One entry per standalone commit
    pub entries: Vec<ChangelogEntry>,
    /// Commits inspected across all pages
    pub considered: usize,
    /// Commits skipped because a collected PR already covers them
    pub already_seen: usize,
    /// Commits skipped because the host links them to some PR
    pub with_pulls: usize,
    /// Pagination anomaly, if the history walk ended on one
    pub diagnostic: Option<Diagnostic>,
}

/// Collect entries for commits in `window` that are not covered by a pull
/// request.
///
/// Issues one extra request per commit not found in `seen`.
///
/// # Errors
///
/// Transport errors and undecodable pages abort the pass.
pub async fn reconcile_commits(
    source: &dyn PageSource,
    endpoints: &RepoEndpoints,
    window: &Window,
    seen: &SeenShas,
    style: LinkStyle,
) -> Result<CommitPass, ForgeError> {
    let mut pass = CommitPass::default();
    let mut pages = Pages::new(source, endpoints.commits_in(window));

    while let Some(body) = pages.next_page().await? {
        let commits: Vec<CommitRecord> = decode_page(&body, "commit page")?;

        for commit in commits {
            pass.considered += 1;

            if seen.contains(&commit.sha) {
                pass.already_seen += 1;
                continue;
            }

            if has_associated_pulls(source, endpoints, &commit.sha).await? {
                debug!(sha = %commit.short_sha(), "commit belongs to a pull request");
                pass.with_pulls += 1;
                continue;
            }

            pass.entries.push(ChangelogEntry::for_commit(&commit, style));
        }
    }
    pass.diagnostic = pages.diagnostic();

    info!(
        considered = pass.considered,
        already_seen = pass.already_seen,
        with_pulls = pass.with_pulls,
        standalone = pass.entries.len(),
        "commit pass complete"
    );
    Ok(pass)
}

/// Whether the host links `sha` to at least one pull request.
///
/// Only the first page is read.
pub async fn has_associated_pulls(
    source: &dyn PageSource,
    endpoints: &RepoEndpoints,
    sha: &str,
) -> Result<bool, ForgeError> {
    let mut found = false;
    fetch_pages(source, &endpoints.commit_pulls(sha), |body| {
        let pulls: Vec<IgnoredAny> = decode_page(body, "associated pull request page")?;
        found = !pulls.is_empty();
        Ok(false)
    })
    .await?;
    Ok(found)
}
