//! Core types and traits for the paper-trading simulator.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Candle)
//! - Simulation payloads (Advice, Trade, Portfolio, RoundTrip, Report)
//! - The Advisor and ReportHandler traits that connect the core to its
//!   collaborators

pub mod types;
pub mod traits;
pub mod error;

pub use error::{ConfigError, DataError, PaperTradeError, SimResult};
pub use types::*;
pub use traits::*;
