//! Round-trip reconstruction and performance tracking.

use papertrade_core::{Candle, Portfolio, Report, RoundTrip, Side, Trade, TradeAction};
use tracing::debug;

use crate::statistics::{calculate_report, sharpe, ReportInput};

/// The entry half of a round trip that has not closed yet.
#[derive(Debug, Clone, Copy)]
struct OpenRoundTrip {
    side: Side,
    entry_at: i64,
    entry_price: f64,
    entry_balance: f64,
    /// Worst unrealized price excursion so far, <= 0
    drawdown: f64,
}

/// Pairs position-opening trades with their closing trades and keeps the
/// running statistics needed to derive a report at any point.
pub struct PerformanceTracker {
    currency: String,
    asset: String,
    risk_free_return: f64,

    /// First and last processed candle, unix milliseconds
    dates: Option<(i64, i64)>,
    start_price: f64,
    end_price: f64,

    start: Option<Portfolio>,
    current: Option<Portfolio>,

    round_trips: Vec<RoundTrip>,
    open: Option<OpenRoundTrip>,
    /// Cached; recomputed over the full series on every finalized trip
    sharpe: f64,
}

impl PerformanceTracker {
    pub fn new(currency: &str, asset: &str, risk_free_return: f64) -> Self {
        Self {
            currency: currency.to_string(),
            asset: asset.to_string(),
            risk_free_return,
            dates: None,
            start_price: 0.0,
            end_price: 0.0,
            start: None,
            current: None,
            round_trips: Vec::new(),
            open: None,
            sharpe: 0.0,
        }
    }

    /// Track dates and prices, and grow the open round trip's drawdown if
    /// this candle sets a worse excursion.
    pub fn process_candle(&mut self, candle: &Candle) {
        self.dates = match self.dates {
            None => {
                self.start_price = candle.close;
                Some((candle.start, candle.start))
            }
            Some((start, _)) => Some((start, candle.start)),
        };
        self.end_price = candle.close;

        if let Some(open) = &mut self.open {
            let excursion = match open.side {
                Side::Long => candle.close - open.entry_price,
                Side::Short => open.entry_price - candle.close,
            };
            if excursion < open.drawdown {
                open.drawdown = excursion;
            }
        }
    }

    /// Record the initialized portfolio as the profit baseline.
    pub fn process_portfolio_update(&mut self, portfolio: &Portfolio) {
        self.start = Some(*portfolio);
        self.current = Some(*portfolio);
    }

    /// Process an executed trade. Returns the report as of this trade and
    /// the round trip it completed, if any.
    ///
    /// The report is derived before the round trip is finalized, so it
    /// reflects the state the moment the trade fired; the next trade (or
    /// finalize) picks up the completed trip.
    pub fn process_trade(&mut self, trade: &Trade) -> (Report, Option<RoundTrip>) {
        self.current = Some(trade.portfolio);
        let report = self.report();
        let completed = self.track_round_trip(trade);
        (report, completed)
    }

    /// Derive the report from the current state.
    pub fn report(&self) -> Report {
        let start_balance = self.start.and_then(|p| p.balance).unwrap_or(0.0);
        let balance = self.current.map(|p| p.asset).unwrap_or(start_balance);

        calculate_report(&ReportInput {
            round_trips: &self.round_trips,
            dates: self.dates.unwrap_or((0, 0)),
            prices: (self.start_price, self.end_price),
            start_balance,
            balance,
            sharpe: self.sharpe,
            currency: &self.currency,
            asset: &self.asset,
        })
    }

    /// Finalized round trips so far.
    pub fn round_trips(&self) -> &[RoundTrip] {
        &self.round_trips
    }

    fn track_round_trip(&mut self, trade: &Trade) -> Option<RoundTrip> {
        match trade.action {
            TradeAction::Long | TradeAction::Short => {
                // a flip closes the running trip before the new entry
                let completed = self.open.take().map(|open| self.finalize(open, trade));
                self.open = Some(OpenRoundTrip {
                    side: match trade.action {
                        TradeAction::Long => Side::Long,
                        _ => Side::Short,
                    },
                    entry_at: trade.date,
                    entry_price: trade.price,
                    entry_balance: trade.portfolio.asset,
                    drawdown: 0.0,
                });
                completed
            }
            TradeAction::Close => self.open.take().map(|open| self.finalize(open, trade)),
        }
    }

    fn finalize(&mut self, open: OpenRoundTrip, exit: &Trade) -> RoundTrip {
        let round_trip = RoundTrip {
            id: self.round_trips.len() as u64,
            side: open.side,
            entry_at: open.entry_at,
            entry_price: open.entry_price,
            entry_balance: open.entry_balance,
            exit_at: exit.date,
            exit_price: exit.price,
            exit_balance: exit.portfolio.asset,
            duration_ms: exit.date - open.entry_at,
            drawdown: open.drawdown,
            pnl: exit.portfolio.asset - open.entry_balance,
            profit: 100.0 * exit.portfolio.asset / open.entry_balance - 100.0,
        };

        debug!(
            id = round_trip.id,
            side = %round_trip.side,
            profit = round_trip.profit,
            "round trip completed"
        );
        self.round_trips.push(round_trip);

        // the cached sharpe always covers the full series
        let profits: Vec<f64> = self.round_trips.iter().map(|rt| rt.profit).collect();
        self.sharpe = sharpe(&profits, self.risk_free_return);

        round_trip
    }
}
