//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force, as_json } => init_config(force, as_json, ctx),
        ConfigCommand::Path => show_path(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    let commerce = &ctx.config.commerce;
    ctx.output.info("[store]");
    ctx.output.kv("dir", &ctx.store_dir().display().to_string());

    ctx.output.info("[commerce]");
    ctx.output.kv("storage_key", &commerce.storage_key);
    ctx.output.kv("currency", commerce.currency.code());
    ctx.output.kv("shipping_fee", &commerce.shipping_policy().flat_fee.display());
    ctx.output.kv(
        "notification_dismiss_ms",
        &commerce.notification_dismiss_ms.to_string(),
    );
    ctx.output.kv("redirect_delay_ms", &commerce.redirect_delay_ms.to_string());
    ctx.output.kv(
        "submission_latency_ms",
        &commerce.submission_latency_ms.to_string(),
    );
    ctx.output.kv(
        "require_customer_details",
        &commerce.require_customer_details.to_string(),
    );
    ctx.output.kv("form_latency_ms", &commerce.form_latency_ms.to_string());
    ctx.output.kv(
        "max_design_file_bytes",
        &commerce.max_design_file_bytes.to_string(),
    );

    Ok(())
}

fn init_config(force: bool, as_json: bool, ctx: &Context) -> Result<()> {
    let name = if as_json {
        CONFIG_FILE_NAMES[2]
    } else {
        CONFIG_FILE_NAMES[0]
    };
    let config_path = ctx.cwd.join(name);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if as_json {
        CliConfig::default().save(&config_path)?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    match &ctx.config_path {
        Some(path) if ctx.output.is_json() => {
            ctx.output.json(&serde_json::json!({ "path": path }));
        }
        Some(path) => println!("{}", path.display()),
        None => bail!("No config file found. Run `printease config init` to create one."),
    }
    Ok(())
}
