//! config command - Get, set, or list configuration values

use anyhow::{Context as _, Result};

use super::load_config;
use crate::cli::Context;
use crate::core::config::{Config, KNOWN_KEYS};
use crate::ui::output;

/// Get a configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let config = load_config(ctx)?;

    // Key exists but has no value: print nothing
    if let Some(value) = config.get(key)? {
        output::result(value);
    }
    Ok(())
}

/// Set a value in the project config.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let cwd = ctx.working_dir()?;
    let path = Config::set_project_value(&cwd, key, value).context("Failed to write config")?;

    output::print(
        format!("Set {} = {} in {}", key, value, path.display()),
        ctx.verbosity(),
    );
    Ok(())
}

/// List all effective configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let config = load_config(ctx)?;

    let lines: Vec<String> = KNOWN_KEYS
        .iter()
        .map(|key| {
            let value = config.get(key).ok().flatten().unwrap_or_default();
            format!("{} = {}", key, value)
        })
        .collect();

    output::result(output::format_list(&lines, ""));
    Ok(())
}

/// Show which config files were loaded.
pub fn path(ctx: &Context) -> Result<()> {
    let config = load_config(ctx)?;
    let describe = |p: Option<&std::path::Path>| {
        p.map_or_else(|| "(none)".to_string(), |p| p.display().to_string())
    };

    output::result(format!(
        "global: {}",
        describe(config.global_config_loaded_from())
    ));
    output::result(format!(
        "project: {}",
        describe(config.project_config_loaded_from())
    ));
    Ok(())
}
