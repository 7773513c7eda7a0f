//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, StorefrontConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    match &ctx.config_path {
        Some(path) => ctx.output.kv("File", &path.display().to_string()),
        None => ctx.output.kv("File", "(none, using defaults)"),
    }

    let source = &ctx.config.source;
    ctx.output.info("");
    ctx.output.info("Source:");
    if let Some(path) = &source.path {
        ctx.output.kv("Path", path);
    }
    if let Some(url) = &source.url {
        ctx.output.kv("URL", url);
    }
    if let Some(env) = &source.api_key_env {
        let state = if std::env::var_os(env).is_some() {
            "set"
        } else {
            "not set"
        };
        ctx.output.kv("API key", &format!("${} ({})", env, state));
    }
    ctx.output.kv("Limit", &source.limit.to_string());

    let listing = &ctx.config.listing;
    ctx.output.info("");
    ctx.output.info("Listing:");
    ctx.output.kv("Default view", listing.default_view.as_str());
    ctx.output.kv(
        "Default sort",
        listing
            .default_sort
            .map(|s| s.as_str())
            .unwrap_or("(page default)"),
    );
    ctx.output.kv("Per page", &listing.per_page.to_string());
    ctx.output.kv("New within", &format!("{} days", listing.new_within_days));

    ctx.output.info("");
    ctx.output.info("Logging:");
    ctx.output.kv("Filter", &ctx.config.logging.filter);

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        if ctx.output.is_json() {
            bail!(
                "Config file already exists: {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", config_path.display()))
            .default(false)
            .interact()?;

        if !overwrite {
            ctx.output.info("Cancelled.");
            return Ok(());
        }
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn check(config: &StorefrontConfig) -> (Vec<String>, Vec<String>) {
    let (errors, mut warnings) = config.check();
    if let Some(env) = &config.source.api_key_env {
        if config.source.url.is_some() && std::env::var_os(env).is_none() {
            warnings.push(format!("environment variable {} is not set", env));
        }
    }
    (errors, warnings)
}
