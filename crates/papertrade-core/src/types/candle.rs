//! OHLCV candle type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single OHLCV candle.
///
/// The simulation core only reads `start`, `close`, `high` and `low`;
/// open and volume are carried for advisors and the CSV feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Opening timestamp, unix milliseconds
    pub start: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Traded volume
    pub volume: f64,
}

impl Candle {
    /// Create a new candle.
    pub fn new(start: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            start,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Get the start timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.start)
            .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap())
    }

    /// Candle range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Check if the candle is bullish (close > open).
    #[inline]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

impl Default for Candle {
    fn default() -> Self {
        Self {
            start: 0,
            open: 0.0,
            high: 0.0,
            low: 0.0,
            close: 0.0,
            volume: 0.0,
        }
    }
}
