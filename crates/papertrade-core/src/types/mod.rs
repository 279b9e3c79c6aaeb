//! Core data types for the simulator.

mod candle;
mod advice;
mod portfolio;
mod trade;
mod roundtrip;
mod report;

pub use candle::Candle;
pub use advice::{Advice, Recommendation};
pub use portfolio::Portfolio;
pub use trade::{Trade, TradeAction};
pub use roundtrip::{RoundTrip, Side};
pub use report::Report;
