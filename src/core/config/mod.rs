//! core::config
//!
//! Configuration loading.
//!
//! # Overview
//!
//! quarterlog has two configuration scopes sharing one schema
//! ([`FileConfig`]):
//! - **Global**: user-level settings
//! - **Project**: `quarterlog.toml` in the working directory
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `--config <path>` if given (must exist)
//! 2. `$QUARTERLOG_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/quarterlog/config.toml`
//! 4. `~/.quarterlog/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use quarterlog::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Path::new("."), None).unwrap();
//! println!("API base: {}", config.api_base());
//! println!("Output: {}", config.output().display());
//! ```

pub mod schema;

pub use schema::FileConfig;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::changelog::LinkStyle;
use crate::core::types::RepoSlug;
use crate::forge::github::{DEFAULT_API_BASE, DEFAULT_USER_AGENT};

/// Name of the project config file.
pub const PROJECT_CONFIG_FILE: &str = "quarterlog.toml";

/// Default token file, relative to the working directory.
pub const DEFAULT_TOKEN_FILE: &str = "access_token.txt";

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "output.md";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}'")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("config file '{0}' does not exist")]
    Missing(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence and defaults. Project config overrides global
/// config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: FileConfig,
    /// Project configuration (if present)
    pub project: Option<FileConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the project config file (if loaded)
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration for a run in `cwd`.
    ///
    /// `explicit` replaces the global search with a single required file.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed or
    /// validated, or if `explicit` names a missing file. Missing files in the
    /// default locations are not an error.
    pub fn load(cwd: &Path, explicit: Option<&Path>) -> Result<Config, ConfigError> {
        let (global, global_path) = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::Missing(path.to_path_buf()));
                }
                (Self::read_config(path)?, Some(path.to_path_buf()))
            }
            None => Self::load_global()?,
        };

        let project_file = cwd.join(PROJECT_CONFIG_FILE);
        let (project, project_path) = if project_file.exists() {
            (Some(Self::read_config(&project_file)?), Some(project_file))
        } else {
            (None, None)
        };

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        Ok(Config {
            global,
            project,
            global_path,
            project_path,
        })
    }

    /// Load global configuration from standard locations.
    fn load_global() -> Result<(FileConfig, Option<PathBuf>), ConfigError> {
        // 1. Check $QUARTERLOG_CONFIG
        if let Ok(path) = std::env::var("QUARTERLOG_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 2. Check $XDG_CONFIG_HOME/quarterlog/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("quarterlog/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 3. Check ~/.quarterlog/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".quarterlog/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((FileConfig::default(), None))
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Global and project config merged, without defaults applied.
    pub fn effective(&self) -> FileConfig {
        match &self.project {
            Some(project) => self.global.merged_with(project),
            None => self.global.clone(),
        }
    }

    /// Path of the loaded global config file, if any.
    pub fn global_path(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Path of the loaded project config file, if any.
    pub fn project_path(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }

    /// Configured repository. Validated at load time.
    pub fn repo(&self) -> Option<RepoSlug> {
        self.effective().repo.and_then(|r| r.parse().ok())
    }

    /// API base URL without a trailing slash.
    pub fn api_base(&self) -> String {
        self.effective()
            .api_base
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// Token file path (may not exist).
    pub fn token_file(&self) -> PathBuf {
        self.effective()
            .token_file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE))
    }

    /// Output path; `-` means stdout.
    pub fn output(&self) -> PathBuf {
        self.effective()
            .output
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    pub fn link_style(&self) -> LinkStyle {
        self.effective().link_style.unwrap_or_default()
    }

    pub fn user_agent(&self) -> String {
        self.effective()
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = Config::default();
        assert_eq!(config.api_base(), "https://api.github.com");
        assert_eq!(config.token_file(), PathBuf::from("access_token.txt"));
        assert_eq!(config.output(), PathBuf::from("output.md"));
        assert_eq!(config.link_style(), LinkStyle::Plain);
        assert_eq!(config.user_agent(), "quarterlog-cli");
        assert!(config.repo().is_none());
    }

    #[test]
    fn explicit_file_and_project_file_merge() {
        let dir = TempDir::new().unwrap();
        let global = write(
            dir.path(),
            "global.toml",
            "repo = \"a/b\"\noutput = \"global.md\"\napi_base = \"https://ghe.test/api/v3/\"\n",
        );
        write(dir.path(), PROJECT_CONFIG_FILE, "output = \"project.md\"\n");

        let config = Config::load(dir.path(), Some(&global)).unwrap();
        assert_eq!(config.repo().unwrap().to_string(), "a/b");
        assert_eq!(config.output(), PathBuf::from("project.md"));
        assert_eq!(config.api_base(), "https://ghe.test/api/v3");
        assert_eq!(config.global_path(), Some(global.as_path()));
        assert_eq!(
            config.project_path(),
            Some(dir.path().join(PROJECT_CONFIG_FILE).as_path())
        );
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Config::load(dir.path(), Some(&missing)),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn invalid_project_file_is_error() {
        let dir = TempDir::new().unwrap();
        let global = write(dir.path(), "global.toml", "");
        write(dir.path(), PROJECT_CONFIG_FILE, "repo = \"bad\"\n");
        assert!(matches!(
            Config::load(dir.path(), Some(&global)),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn unparseable_file_is_error() {
        let dir = TempDir::new().unwrap();
        let global = write(dir.path(), "global.toml", "repo = ");
        assert!(matches!(
            Config::load(dir.path(), Some(&global)),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn unreadable_file_keeps_io_error_as_source() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global.toml");
        fs::create_dir(&global).unwrap();

        let err = Config::load(dir.path(), Some(&global)).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert_eq!(
            err.to_string(),
            format!("failed to read config file '{}'", global.display())
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
