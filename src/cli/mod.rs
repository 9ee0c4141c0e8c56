//! cli
//!
//! Command-line interface layer for quarterlog.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Set up logging for the chosen verbosity
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, resolves settings
//! through [`crate::core::config`], and hands the actual work to
//! [`crate::changelog`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::{Context as _, Result};

use crate::ui::output::{self, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    output::init_logging(verbosity);

    let cwd = match cli.cwd {
        Some(cwd) => cwd,
        None => std::env::current_dir().context("failed to determine working directory")?,
    };

    let ctx = commands::Context {
        cwd,
        config_path: cli.config,
        verbosity,
    };

    commands::dispatch(cli.command, &ctx)
}
