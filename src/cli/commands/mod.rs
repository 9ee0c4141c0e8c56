//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves configuration and command-specific arguments
//! 2. Calls into the library to do the work
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! `generate` is async because it performs network I/O. Its handler builds a
//! tokio runtime and blocks on it, keeping dispatch synchronous.

mod completion;
mod config_cmd;
mod generate;
mod window;

pub use completion::completion;
pub use config_cmd::config;
pub use generate::{generate, RunPlan};
pub use window::window;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::args::Command;
use crate::core::config::Config;
use crate::ui::output::Verbosity;

/// Per-invocation context built from global flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory relative paths resolve against
    pub cwd: PathBuf,
    /// Explicit config file (`--config`)
    pub config_path: Option<PathBuf>,
    /// Output verbosity
    pub verbosity: Verbosity,
}

impl Context {
    /// Load configuration for this invocation.
    pub fn load_config(&self) -> Result<Config> {
        Config::load(&self.cwd, self.config_path.as_deref()).context("failed to load configuration")
    }

    /// Resolve `path` against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }
}

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Generate(args) => generate::generate(ctx, args),
        Command::Window { quarter } => window::window(quarter),
        Command::Config => config_cmd::config(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}
