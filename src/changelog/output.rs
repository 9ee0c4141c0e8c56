//! changelog::output
//!
//! Persisting the rendered changelog.
//!
//! The file is written to a temp file next to the target and then renamed
//! over it, so a failed write never leaves a truncated changelog behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from writing the output file.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write '{path}'")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Write `contents` to `path` atomically, replacing any existing file.
///
/// The temp file is removed again if any step after its creation fails.
///
/// # Errors
///
/// Returns `OutputError::WriteError` if the temp file cannot be created,
/// written, synced, or renamed.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err(path))?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let file = fs::File::create(&temp_path).map_err(write_err(&temp_path))?;
    let result = write_temp(file, &temp_path, contents)
        .and_then(|()| fs::rename(&temp_path, path).map_err(write_err(path)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp(mut file: fs::File, temp_path: &Path, contents: &str) -> Result<(), OutputError> {
    file.write_all(contents.as_bytes())
        .map_err(write_err(temp_path))?;
    file.sync_all().map_err(write_err(temp_path))
}

fn write_err(path: &Path) -> impl FnOnce(std::io::Error) -> OutputError {
    let path = path.to_path_buf();
    move |source| OutputError::WriteError { path, source }
}
