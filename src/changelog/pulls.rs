//! changelog::pulls
//!
//! First pass: merged pull requests.
//!
//! # Algorithm
//!
//! Closed pull requests arrive newest-closed first. For each one:
//!
//! 1. No usable merge sha (shorter than [`MIN_MERGE_SHA_LEN`]) → skip. These
//!    are PRs closed without merging.
//! 2. Not merged, or merged before the window → skip.
//! 3. Otherwise the PR is *valid*: it is recent enough that later pages may
//!    still matter.
//! 4. Merged inside the window → record its merge sha and emit an entry.
//!
//! A page with no valid PR ends the walk. This relies on the listing being
//! ordered by closure time, which GitHub does not document as a contract; a
//! PR closed late but merged early could still hide behind an all-old page.

use std::collections::HashSet;

use tracing::{info, trace};

use super::entry::{ChangelogEntry, LinkStyle};
use crate::core::window::Window;
use crate::forge::{
    decode_page, fetch_pages, Diagnostic, ForgeError, PageSource, PullRequestRecord, RepoEndpoints,
};

/// Merge shas shorter than this are treated as "not merged".
pub const MIN_MERGE_SHA_LEN: usize = 2;

/// Merge-commit shas recorded by the pull request pass.
pub type SeenShas = HashSet<String>;

/// Result of the pull request pass.
#[derive(Debug, Default)]
pub struct PullRequestPass {
    /// One entry per PR merged inside the window
    pub entries: Vec<ChangelogEntry>,
    /// Merge shas of those PRs
    pub seen: SeenShas,
    /// Pull requests inspected across all pages
    pub considered: usize,
    /// Pagination anomaly, if the walk ended on one
    pub diagnostic: Option<Diagnostic>,
}

impl PullRequestPass {
    /// Apply one page of pull requests. Returns whether the walk should
    /// continue.
    pub fn apply_page(
        &mut self,
        page: &[PullRequestRecord],
        window: &Window,
        style: LinkStyle,
    ) -> bool {
        let mut any_valid = false;

        for pr in page {
            self.considered += 1;

            let sha = pr.merge_sha();
            if sha.len() < MIN_MERGE_SHA_LEN {
                trace!(number = pr.number, "skipping pull request without merge commit");
                continue;
            }

            let Some(merged_at) = pr.merged_at.filter(|at| *at >= window.start) else {
                continue;
            };
            any_valid = true;

            if !window.contains(merged_at) {
                continue;
            }

            self.seen.insert(sha.to_string());
            self.entries
                .push(ChangelogEntry::for_pull_request(pr, merged_at, style));
        }

        any_valid
    }
}

/// Collect entries for pull requests merged inside `window`.
///
/// # Errors
///
/// Transport errors and undecodable pages abort the pass.
pub async fn collect_pull_requests(
    source: &dyn PageSource,
    endpoints: &RepoEndpoints,
    window: &Window,
    style: LinkStyle,
) -> Result<PullRequestPass, ForgeError> {
    let mut pass = PullRequestPass::default();

    let diagnostic = fetch_pages(source, &endpoints.closed_pulls(), |body| {
        let page: Vec<PullRequestRecord> = decode_page(body, "pull request page")?;
        Ok(pass.apply_page(&page, window, style))
    })
    .await?;
    pass.diagnostic = diagnostic;

    info!(
        considered = pass.considered,
        merged = pass.entries.len(),
        "pull request pass complete"
    );
    Ok(pass)
}
