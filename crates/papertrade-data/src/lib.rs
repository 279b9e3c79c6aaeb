//! Candle feeds.
//!
//! The simulation core consumes an ordered candle slice; this crate
//! produces one from historical data files.

mod csv_source;

pub use csv_source::CsvCandleSource;
