//! Config validation command.

use anyhow::{Context, Result};
use papertrade_config::load_config;
use std::path::Path;

pub fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    config
        .paper_trader
        .validate()
        .context("Invalid paper trader settings")?;

    println!("Configuration OK:");
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
