//! secrets::token_file
//!
//! Optional bearer token stored in a plain file.
//!
//! # Behavior
//!
//! - A missing file means "no token"; requests go out unauthenticated.
//! - Surrounding whitespace (typically a trailing newline from an editor or
//!   `echo`) is stripped; an empty result is treated as no token.
//! - Any other read failure is an error; callers decide whether to proceed
//!   without a token.
//! - The token is never logged, printed, or included in error messages.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from reading a token file.
#[derive(Debug, Error)]
pub enum TokenFileError {
    #[error("cannot read token file '{path}'")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A token file location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the token, if the file exists and is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `TokenFileError::Unreadable` for failures other than the file
    /// not existing (permissions, invalid UTF-8, path is a directory).
    pub fn read(&self) -> Result<Option<String>, TokenFileError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TokenFileError::Unreadable {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}
