//! Error types for the simulator.

use thiserror::Error;

/// Top-level simulator error.
#[derive(Error, Debug)]
pub enum PaperTradeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Candle feed errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("No data available at {0}")]
    NoDataAvailable(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Candles out of order: {previous} followed by {current}")]
    OutOfOrder { previous: i64, current: i64 },
}

/// Result type alias for simulator operations.
pub type SimResult<T> = Result<T, PaperTradeError>;
