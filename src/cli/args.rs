//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--config <path>`: Use this file instead of the global config search
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::changelog::LinkStyle;
use crate::core::window::Quarter;

/// quarterlog - Draft a quarterly changelog from merged pull requests and commits
#[derive(Parser, Debug)]
#[command(name = "quarterlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if quarterlog was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Config file to use instead of the global config search
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the changelog for a quarter
    #[command(
        name = "generate",
        long_about = "Generate the changelog for a quarter.\n\n\
            Lists every pull request merged during the quarter, plus every commit \
            from the same period that no pull request accounts for, as markdown \
            list items ordered by date. By default the quarter is the one before \
            the current quarter.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Last quarter's changes for the configured repository
    quarterlog generate

    # A specific repository and quarter, printed to stdout
    quarterlog generate --repo graphiteeditor/graphite --quarter 2024-Q2 --output -

    # Wrap links in <small> tags for a website changelog
    quarterlog generate --link-style small

AUTHENTICATION:
    If access_token.txt (or --token-file) exists, its contents are sent as a
    bearer token. Without it, requests are anonymous and heavily rate limited."
    )]
    Generate(GenerateArgs),

    /// Show the window a run would cover
    #[command(name = "window")]
    Window {
        /// Quarter to show (YYYY-Qn); defaults to the previous quarter
        #[arg(long)]
        quarter: Option<Quarter>,
    },

    /// Show the effective configuration
    #[command(name = "config")]
    Config,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    quarterlog completion bash > ~/.local/share/bash-completion/completions/quarterlog

    # Zsh
    quarterlog completion zsh > ~/.zfunc/_quarterlog

    # Fish
    quarterlog completion fish > ~/.config/fish/completions/quarterlog.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for `generate`. Unset flags fall back to configuration.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Repository as owner/name or a GitHub URL
    #[arg(long)]
    pub repo: Option<String>,

    /// Quarter to cover (YYYY-Qn); defaults to the previous quarter
    #[arg(long)]
    pub quarter: Option<Quarter>,

    /// Output file, or - for stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// File holding a bearer token
    #[arg(long, value_name = "PATH")]
    pub token_file: Option<PathBuf>,

    /// REST API base URL
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Link rendering: plain or small
    #[arg(long)]
    pub link_style: Option<LinkStyle>,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
