//! Console report handler.

use papertrade_core::{Portfolio, Report, ReportHandler, RoundTrip, Trade};
use tracing::info;

/// Logs simulation events as they happen. Rendering of the final report
/// is left to the CLI command.
#[derive(Debug, Default)]
pub struct ConsoleHandler {
    trades: usize,
}

impl ConsoleHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportHandler for ConsoleHandler {
    fn on_trade(&mut self, trade: &Trade, report: &Report) {
        self.trades += 1;
        info!(
            action = %trade.action,
            price = trade.price,
            balance = trade.balance,
            profit = report.profit,
            "trade"
        );
    }

    fn on_round_trip(&mut self, round_trip: &RoundTrip) {
        info!(
            id = round_trip.id,
            side = %round_trip.side,
            entry = round_trip.entry_price,
            exit = round_trip.exit_price,
            profit = round_trip.profit,
            drawdown = round_trip.drawdown,
            "round trip"
        );
    }

    fn on_portfolio_update(&mut self, portfolio: &Portfolio) {
        info!(
            asset = portfolio.asset,
            currency = portfolio.currency,
            "portfolio initialized"
        );
    }

    fn on_finalize(&mut self, report: &Report) {
        info!(
            trades = self.trades,
            round_trips = report.trades,
            profit = report.profit,
            sharpe = report.sharpe,
            "simulation finalized"
        );
    }
}
