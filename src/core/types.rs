//! core::types
//!
//! Strong types for validated domain values.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::forge::github::parse_github_url;

/// Errors from parsing domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("invalid repository '{0}': expected 'owner/name' or a GitHub URL")]
    InvalidRepo(String),
}

/// A repository identified by owner and name.
///
/// # Example
///
/// ```
/// use quarterlog::core::types::RepoSlug;
///
/// let slug: RepoSlug = "graphiteeditor/graphite".parse().unwrap();
/// assert_eq!(slug.owner(), "graphiteeditor");
/// assert_eq!(slug.name(), "graphite");
///
/// let from_url: RepoSlug = "https://github.com/graphiteeditor/graphite.git".parse().unwrap();
/// assert_eq!(from_url, slug);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    /// Create a slug from owner and name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRepo` if either part is empty or contains
    /// characters GitHub does not allow in owner/repository names.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, TypeError> {
        let owner = owner.into();
        let name = name.into();
        if !is_valid_part(&owner) || !is_valid_part(&name) {
            return Err(TypeError::InvalidRepo(format!("{}/{}", owner, name)));
        }
        Ok(Self { owner, name })
    }

    /// Repository owner (user or organization).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn is_valid_part(part: &str) -> bool {
    !part.is_empty()
        && part != "."
        && part != ".."
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl FromStr for RepoSlug {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((owner, name)) = parse_github_url(s) {
            return Self::new(owner, name);
        }

        match s.split_once('/') {
            Some((owner, name)) => {
                Self::new(owner, name).map_err(|_| TypeError::InvalidRepo(s.to_string()))
            }
            None => Err(TypeError::InvalidRepo(s.to_string())),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
