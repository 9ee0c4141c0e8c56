//! generate command - Collect the quarter's changes and write the changelog

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context as _, Result};
use chrono::{NaiveDate, Utc};
use tracing::warn;

use super::Context;
use crate::changelog::{self, output::write_atomic, LinkStyle};
use crate::cli::args::GenerateArgs;
use crate::core::config::Config;
use crate::core::types::RepoSlug;
use crate::core::window::{Quarter, Window};
use crate::forge::github::GitHubForge;
use crate::forge::RepoEndpoints;
use crate::secrets::TokenFile;
use crate::ui::output::{self, Verbosity};

/// Where the rendered changelog goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

/// Fully resolved inputs for one run: CLI flags over config over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub endpoints: RepoEndpoints,
    pub quarter: Quarter,
    pub window: Window,
    pub token_file: PathBuf,
    pub destination: Destination,
    pub style: LinkStyle,
    pub user_agent: String,
}

impl RunPlan {
    /// Resolve a plan for a run on `today`.
    ///
    /// # Errors
    ///
    /// Fails if no repository is configured, or if a flag value is invalid.
    pub fn resolve(
        ctx: &Context,
        config: &Config,
        args: GenerateArgs,
        today: NaiveDate,
    ) -> Result<Self> {
        let repo: RepoSlug = match args.repo {
            Some(repo) => repo.parse()?,
            None => config.repo().ok_or_else(|| {
                anyhow!("no repository configured; pass --repo owner/name or set `repo` in quarterlog.toml")
            })?,
        };

        let api_base = args.api_base.unwrap_or_else(|| config.api_base());
        if !(api_base.starts_with("https://") || api_base.starts_with("http://")) {
            bail!("invalid --api-base '{}', must start with http:// or https://", api_base);
        }

        let quarter = args
            .quarter
            .unwrap_or_else(|| Quarter::preceding(today));
        let window = quarter.window()?;

        let token_file = ctx.resolve(&args.token_file.unwrap_or_else(|| config.token_file()));

        let output = args.output.unwrap_or_else(|| config.output());
        let destination = if output == Path::new("-") {
            Destination::Stdout
        } else {
            Destination::File(ctx.resolve(&output))
        };

        Ok(Self {
            endpoints: RepoEndpoints::new(api_base, repo),
            quarter,
            window,
            token_file,
            destination,
            style: args.link_style.unwrap_or_else(|| config.link_style()),
            user_agent: config.user_agent(),
        })
    }
}

/// Generate the changelog.
pub fn generate(ctx: &Context, args: GenerateArgs) -> Result<()> {
    let config = ctx.load_config()?;
    let plan = RunPlan::resolve(ctx, &config, args, Utc::now().date_naive())?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(&plan, ctx.verbosity))
}

/// Execute a resolved plan.
///
/// Nothing is written unless both passes succeed.
pub async fn run(plan: &RunPlan, verbosity: Verbosity) -> Result<()> {
    let token = load_token(&plan.token_file, verbosity);
    let forge = GitHubForge::new(token).with_user_agent(&plan.user_agent);

    output::status(
        format!(
            "Collecting {} changes for {} ({})",
            plan.quarter,
            plan.endpoints.repo(),
            plan.window
        ),
        verbosity,
    );

    let report = changelog::generate(&forge, &plan.endpoints, &plan.window, plan.style)
        .await
        .with_context(|| format!("failed to collect changes for {}", plan.endpoints.repo()))?;

    if !report.diagnostics.is_empty() && verbosity == Verbosity::Debug {
        output::status(
            format!(
                "Pagination notes:\n{}",
                output::format_list(&report.diagnostics, "  - ")
            ),
            verbosity,
        );
    }

    let text = report.render();
    let summary = format!(
        "{} entries ({} pull requests, {} standalone commits; {} commits covered by other pull requests)",
        report.entries.len(),
        report.pull_request_entries,
        report.commit_entries,
        report.commits_with_pulls
    );

    match &plan.destination {
        Destination::Stdout => {
            print!("{}", text);
            output::status(summary, verbosity);
        }
        Destination::File(path) => {
            write_atomic(path, &text)?;
            output::print(format!("Wrote {} to {}", summary, path.display()), verbosity);
        }
    }

    Ok(())
}

/// Read the bearer token. Any failure degrades to unauthenticated requests.
fn load_token(path: &Path, verbosity: Verbosity) -> Option<String> {
    let reason = match TokenFile::new(path).read() {
        Ok(Some(token)) => return Some(token),
        Ok(None) => format!("no token in {}", path.display()),
        Err(err) => {
            let reason = format!("{:#}", anyhow::Error::new(err));
            warn!(error = %reason, "ignoring unreadable token file");
            reason
        }
    };

    output::warn(
        format!("{}; requests are unauthenticated and rate limited", reason),
        verbosity,
    );
    None
}
