//! forge::records
//!
//! Records decoded from the REST listing endpoints.
//!
//! Only the fields the changelog needs are deserialized; everything else in
//! the API payload is ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A pull request from the closed-pull-request listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestRecord {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Web URL for viewing the PR
    #[serde(rename = "html_url")]
    pub url: String,
    /// Merge commit assigned by the host; null or empty for unmerged PRs
    #[serde(default)]
    pub merge_commit_sha: Option<String>,
    /// When the PR was merged; null for PRs closed without merging
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequestRecord {
    /// The merge commit sha, or `""` when absent.
    pub fn merge_sha(&self) -> &str {
        self.merge_commit_sha.as_deref().unwrap_or("")
    }
}

/// A commit from the commit-history listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "CommitPayload")]
pub struct CommitRecord {
    /// Full commit sha
    pub sha: String,
    /// Web URL for viewing the commit
    pub url: String,
    /// Full commit message
    pub message: String,
    /// Committer timestamp
    pub committed_at: DateTime<Utc>,
}

impl CommitRecord {
    /// First line of the commit message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// First seven characters of the sha (or the whole sha if shorter).
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }
}

/// Wire shape of a commit listing item.
#[derive(Deserialize)]
struct CommitPayload {
    sha: String,
    html_url: String,
    commit: CommitData,
}

#[derive(Deserialize)]
struct CommitData {
    message: String,
    committer: Committer,
}

#[derive(Deserialize)]
struct Committer {
    date: DateTime<Utc>,
}

impl From<CommitPayload> for CommitRecord {
    fn from(payload: CommitPayload) -> Self {
        Self {
            sha: payload.sha,
            url: payload.html_url,
            message: payload.commit.message,
            committed_at: payload.commit.committer.date,
        }
    }
}
