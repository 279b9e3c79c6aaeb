//! CSV candle source.

use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use papertrade_core::{Candle, DataError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "start", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close", alias = "Adj Close")]
    close: f64,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: f64,
}

/// Loads candles from a CSV file of historical bars.
pub struct CsvCandleSource {
    path: PathBuf,
}

impl CsvCandleSource {
    /// Create a new CSV candle source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::NoDataAvailable(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Load all candles, sorted by start timestamp.
    pub fn load(&self) -> Result<Vec<Candle>, DataError> {
        let file = std::fs::File::open(&self.path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;
        let candles = load_from_reader(file)?;
        info!(candles = candles.len(), path = %self.path.display(), "candles loaded");
        Ok(candles)
    }
}

/// Parse candles out of any CSV stream.
fn load_from_reader(input: impl std::io::Read) -> Result<Vec<Candle>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut candles = Vec::new();

    for result in reader.deserialize() {
        let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
        let start = parse_timestamp(&record.date)?;

        candles.push(Candle::new(
            start,
            record.open,
            record.high,
            record.low,
            record.close,
            record.volume,
        ));
    }

    candles.sort_by_key(|c| c.start);
    Ok(candles)
}

/// Parse various timestamp formats into unix milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let formats = [
        "%Y-%m-%d",
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%d-%m-%Y",
    ];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc().timestamp_millis());
            }
        }
    }

    // fall back to a bare unix timestamp, assuming milliseconds past
    // 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        if ts > 10_000_000_000 {
            return Ok(ts);
        } else {
            return Ok(ts * 1000);
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_sorted_candles() {
        let csv = "date,open,high,low,close,volume\n\
                   2020-01-02,11,12,10,11.5,200\n\
                   2020-01-01,10,11,9,10.5,100\n";

        let candles = load_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(candles.len(), 2);
        assert!(candles[0].start < candles[1].start);
        assert_eq!(candles[0].close, 10.5);
    }

    #[test]
    fn test_header_aliases() {
        let csv = "Timestamp,Open,High,Low,Close\n\
                   1577836800,10,11,9,10.5\n";

        let candles = load_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(candles[0].start, 1_577_836_800_000);
        assert_eq!(candles[0].volume, 0.0);
    }

    #[test]
    fn test_unix_timestamps() {
        assert_eq!(parse_timestamp("1577836800").unwrap(), 1_577_836_800_000);
        assert_eq!(parse_timestamp("1577836800000").unwrap(), 1_577_836_800_000);
        assert_eq!(parse_timestamp("2020-01-01").unwrap(), 1_577_836_800_000);
        assert!(parse_timestamp("not a date").is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(CsvCandleSource::new("/nonexistent/candles.csv").is_err());
    }
}
