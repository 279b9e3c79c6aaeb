//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "papertrade")]
#[command(author, version, about = "Paper-trading backtest simulator")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a backtest over a CSV candle file
    Backtest(BacktestArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    /// CSV file with historical candles
    #[arg(short, long)]
    pub data: PathBuf,

    /// Report output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write the JSON report to this path
    #[arg(long)]
    pub save: Option<PathBuf>,
}
