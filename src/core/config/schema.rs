//! core::config::schema
//!
//! Configuration file schema.
//!
//! Both the global and the project file share this schema. Every key is
//! optional; unset keys fall through to the next scope and finally to the
//! built-in default.
//!
//! # Validation
//!
//! Values are validated after parsing so a typo in `repo` or `api_base`
//! fails at startup rather than halfway through a run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::changelog::LinkStyle;
use crate::core::types::RepoSlug;

/// Contents of a `quarterlog` TOML file.
///
/// # Example
///
/// ```toml
/// repo = "graphiteeditor/graphite"
/// api_base = "https://api.github.com"
/// token_file = "access_token.txt"
/// output = "output.md"
/// link_style = "small"
/// user_agent = "graphite-changelog"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Repository as `owner/name` or a GitHub URL
    pub repo: Option<String>,

    /// REST API base URL (GitHub Enterprise: `https://host/api/v3`)
    pub api_base: Option<String>,

    /// File holding the bearer token
    pub token_file: Option<PathBuf>,

    /// Output file (`-` for stdout)
    pub output: Option<PathBuf>,

    /// How entry links are rendered
    pub link_style: Option<LinkStyle>,

    /// User-Agent header for API requests
    pub user_agent: Option<String>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(repo) = &self.repo {
            repo.parse::<RepoSlug>()
                .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        }

        if let Some(api_base) = &self.api_base {
            if !(api_base.starts_with("https://") || api_base.starts_with("http://")) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid api_base '{}', must start with http:// or https://",
                    api_base
                )));
            }
        }

        if let Some(user_agent) = &self.user_agent {
            if user_agent.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "user_agent must not be empty".into(),
                ));
            }
        }

        Ok(())
    }

    /// Overlay `other` on top of `self`; set keys in `other` win.
    pub fn merged_with(&self, other: &FileConfig) -> FileConfig {
        FileConfig {
            repo: other.repo.clone().or_else(|| self.repo.clone()),
            api_base: other.api_base.clone().or_else(|| self.api_base.clone()),
            token_file: other.token_file.clone().or_else(|| self.token_file.clone()),
            output: other.output.clone().or_else(|| self.output.clone()),
            link_style: other.link_style.or(self.link_style),
            user_agent: other.user_agent.clone().or_else(|| self.user_agent.clone()),
        }
    }
}
