//! Backtest command implementation.

use anyhow::{Context, Result};
use papertrade_config::{load_config, AppConfig};
use papertrade_data::CsvCandleSource;
use papertrade_sim::BacktestEngine;
use std::path::Path;
use tracing::{info, warn};

use crate::advisor::SmaCrossAdvisor;
use crate::cli::{BacktestArgs, OutputFormat};
use crate::handler::ConsoleHandler;

pub fn run(args: BacktestArgs, config_path: &Path) -> Result<()> {
    let config = if config_path.exists() {
        load_config(config_path).context("Failed to load configuration")?
    } else {
        warn!(path = %config_path.display(), "config file not found, using defaults");
        AppConfig::default()
    };

    let candles = CsvCandleSource::new(&args.data)
        .and_then(|source| source.load())
        .with_context(|| format!("Failed to load candles from {}", args.data.display()))?;
    if candles.is_empty() {
        anyhow::bail!("No candles in {}", args.data.display());
    }

    let mut advisor = SmaCrossAdvisor::new(config.advisor.fast_period, config.advisor.slow_period)
        .context("Invalid advisor settings")?;

    let engine = BacktestEngine::new(config.backtest_config())
        .context("Invalid backtest configuration")?;

    let mut handler = ConsoleHandler::new();
    let report = engine.run(&mut advisor, &candles, &mut handler)?;

    match args.format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }

    if let Some(save_path) = &args.save {
        std::fs::write(save_path, report.to_json()?)?;
        info!(path = %save_path.display(), "report saved");
    }

    Ok(())
}
