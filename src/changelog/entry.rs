//! changelog::entry
//!
//! The unit of changelog output and how it is rendered.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forge::{CommitRecord, PullRequestRecord};

/// How the trailing link group of an entry is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    /// `- Title ([#42](url))`
    #[default]
    Plain,
    /// `- Title <small>([#42](url))</small>`
    Small,
}

impl fmt::Display for LinkStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStyle::Plain => write!(f, "plain"),
            LinkStyle::Small => write!(f, "small"),
        }
    }
}

impl FromStr for LinkStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(LinkStyle::Plain),
            "small" => Ok(LinkStyle::Small),
            other => Err(format!(
                "invalid link style '{}', must be one of: plain, small",
                other
            )),
        }
    }
}

/// One line of the changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    /// Sort key: merge time for pull requests, committer time for commits
    pub date: DateTime<Utc>,
    /// Rendered markdown list item, including the trailing blank line
    pub text: String,
}

impl ChangelogEntry {
    /// Entry for a merged pull request.
    pub fn for_pull_request(
        pr: &PullRequestRecord,
        merged_at: DateTime<Utc>,
        style: LinkStyle,
    ) -> Self {
        let link = format!("[#{}]({})", pr.number, pr.url);
        Self {
            date: merged_at,
            text: list_item(&pr.title, &link, style),
        }
    }

    /// Entry for a commit that no pull request accounts for.
    pub fn for_commit(commit: &CommitRecord, style: LinkStyle) -> Self {
        let link = format!("[commit {}]({})", commit.short_sha(), commit.url);
        Self {
            date: commit.committed_at,
            text: list_item(commit.summary(), &link, style),
        }
    }
}

fn list_item(summary: &str, link: &str, style: LinkStyle) -> String {
    match style {
        LinkStyle::Plain => format!("- {} ({})\n\n", summary, link),
        LinkStyle::Small => format!("- {} <small>({})</small>\n\n", summary, link),
    }
}
