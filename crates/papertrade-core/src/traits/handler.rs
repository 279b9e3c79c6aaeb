//! Report handler trait definition.

use crate::types::{Portfolio, Report, RoundTrip, Trade};

/// Receiver of simulation output.
///
/// Rendering and storage are the handler's concern; the core only pushes
/// owned copies through this interface. A round trip may be delivered
/// more than once for the same id (recomputed on later trades), so
/// handlers must treat `on_round_trip` as upsert, not insert.
pub trait ReportHandler {
    /// Fired on every executed trade, with the report as of that trade.
    fn on_trade(&mut self, _trade: &Trade, _report: &Report) {}

    /// Fired on every finalized round trip.
    fn on_round_trip(&mut self, _round_trip: &RoundTrip) {}

    /// Fired once, when the portfolio balance is initialized.
    fn on_portfolio_update(&mut self, _portfolio: &Portfolio) {}

    /// Fired once, at candle stream exhaustion.
    fn on_finalize(&mut self, _report: &Report) {}
}

/// Handler that discards everything. Useful for benchmarks and tests.
#[derive(Debug, Default)]
pub struct NullHandler;

impl ReportHandler for NullHandler {}
