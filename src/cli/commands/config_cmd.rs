//! config command - Show where configuration came from and what it resolves to

use std::path::Path;

use anyhow::Result;

use super::Context;
use crate::core::config::Config;
use crate::secrets::TokenFile;

/// Print config sources and effective values.
pub fn config(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    println!("{}", describe(ctx, &config));
    Ok(())
}

fn describe(ctx: &Context, config: &Config) -> String {
    let source = |path: Option<&Path>| {
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    };

    let token_file = ctx.resolve(&config.token_file());
    let token_state = match TokenFile::new(&token_file).read() {
        Ok(Some(_)) => "present",
        Ok(None) => "missing or empty, requests are unauthenticated",
        Err(_) => "unreadable, requests are unauthenticated",
    };

    let output = config.output();
    let output = if output == Path::new("-") {
        "stdout".to_string()
    } else {
        ctx.resolve(&output).display().to_string()
    };

    let repo = config
        .repo()
        .map(|r| r.to_string())
        .unwrap_or_else(|| "(unset)".to_string());

    let lines = [
        format!("global config:  {}", source(config.global_path())),
        format!("project config: {}", source(config.project_path())),
        String::new(),
        format!("repo       = {}", repo),
        format!("api_base   = {}", config.api_base()),
        format!("token_file = {} ({})", token_file.display(), token_state),
        format!("output     = {}", output),
        format!("link_style = {}", config.link_style()),
        format!("user_agent = {}", config.user_agent()),
    ];
    lines.join("\n")
}
