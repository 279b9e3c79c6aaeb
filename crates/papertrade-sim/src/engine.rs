//! The backtest driving loop.

use papertrade_core::{Advisor, Candle, DataError, Report, ReportHandler, SimResult};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::tracker::PerformanceTracker;
use crate::trader::{PaperTrader, PaperTraderConfig};

/// Backtest configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Quote currency label, for reporting
    pub currency: String,
    /// Traded asset label, for reporting
    pub asset: String,
    /// Risk-free return used by the sharpe ratio, percent
    pub risk_free_return: f64,
    pub trader: PaperTraderConfig,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            asset: "BTC".to_string(),
            risk_free_return: 2.0,
            trader: PaperTraderConfig::default(),
        }
    }
}

/// Runs a candle stream through the trader, the tracker and the handler.
///
/// Fully synchronous: each candle and each advice is processed to
/// completion before the next is accepted, and the handler only ever
/// receives owned copies of the pipeline's payloads.
pub struct BacktestEngine {
    config: BacktestConfig,
}

impl BacktestEngine {
    /// Create a new engine after validating the configuration.
    pub fn new(config: BacktestConfig) -> SimResult<Self> {
        config.trader.validate()?;
        Ok(Self { config })
    }

    /// Run the backtest to candle stream exhaustion and return the final
    /// report. The same report is delivered to `handler.on_finalize`.
    pub fn run(
        &self,
        advisor: &mut dyn Advisor,
        candles: &[Candle],
        handler: &mut dyn ReportHandler,
    ) -> SimResult<Report> {
        let mut trader = PaperTrader::new(&self.config.trader);
        let mut tracker = PerformanceTracker::new(
            &self.config.currency,
            &self.config.asset,
            self.config.risk_free_return,
        );

        info!(
            candles = candles.len(),
            advisor = advisor.name(),
            "starting backtest"
        );

        let mut previous: Option<i64> = None;
        for candle in candles {
            if let Some(prev) = previous {
                if candle.start < prev {
                    return Err(DataError::OutOfOrder {
                        previous: prev,
                        current: candle.start,
                    }
                    .into());
                }
            }
            previous = Some(candle.start);

            // trader first: the very first candle initializes the balance
            if let Some(portfolio) = trader.process_candle(candle) {
                tracker.process_portfolio_update(&portfolio);
                handler.on_portfolio_update(&portfolio);
            }
            tracker.process_candle(candle);

            if let Some(advice) = advisor.update(candle) {
                if let Some(trade) = trader.process_advice(&advice) {
                    let (report, completed) = tracker.process_trade(&trade);
                    handler.on_trade(&trade, &report);
                    if let Some(round_trip) = completed {
                        handler.on_round_trip(&round_trip);
                    }
                }
            }
        }

        let report = tracker.report();
        handler.on_finalize(&report);
        info!(
            round_trips = report.trades,
            profit = report.profit,
            "backtest finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fee::{FeeSchedule, FeeTier};
    use crate::trader::AccountingModel;
    use papertrade_core::{Advice, Portfolio, Recommendation, RoundTrip, Trade};

    /// Plays back a scripted list of (candle index, recommendation) pairs.
    struct ScriptedAdvisor {
        script: Vec<(usize, Recommendation)>,
        seen: usize,
    }

    impl ScriptedAdvisor {
        fn new(script: Vec<(usize, Recommendation)>) -> Self {
            Self { script, seen: 0 }
        }
    }

    impl Advisor for ScriptedAdvisor {
        fn name(&self) -> &str {
            "scripted"
        }

        fn update(&mut self, candle: &Candle) -> Option<Advice> {
            let index = self.seen;
            self.seen += 1;
            self.script
                .iter()
                .find(|(at, _)| *at == index)
                .map(|(_, rec)| Advice::new(*rec, *candle))
        }

        fn reset(&mut self) {
            self.seen = 0;
        }
    }

    #[derive(Default)]
    struct RecordingHandler {
        trades: Vec<Trade>,
        round_trips: Vec<RoundTrip>,
        portfolio_updates: Vec<Portfolio>,
        finalized: Option<Report>,
    }

    impl ReportHandler for RecordingHandler {
        fn on_trade(&mut self, trade: &Trade, _report: &Report) {
            self.trades.push(*trade);
        }

        fn on_round_trip(&mut self, round_trip: &RoundTrip) {
            self.round_trips.push(*round_trip);
        }

        fn on_portfolio_update(&mut self, portfolio: &Portfolio) {
            self.portfolio_updates.push(*portfolio);
        }

        fn on_finalize(&mut self, report: &Report) {
            self.finalized = Some(report.clone());
        }
    }

    fn feeless_config() -> BacktestConfig {
        BacktestConfig {
            risk_free_return: 0.0,
            trader: PaperTraderConfig {
                fees: FeeSchedule {
                    maker_pct: 0.0,
                    taker_pct: 0.0,
                },
                fee_using: FeeTier::Maker,
                slippage_pct: 0.0,
                asset: 1.0,
                currency: 100.0,
                accounting: AccountingModel::Spot,
            },
            ..BacktestConfig::default()
        }
    }

    fn candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle::new(i as i64 * 60_000, close, close, close, close, 0.0))
            .collect()
    }

    #[test]
    fn test_full_pipeline() {
        let engine = BacktestEngine::new(feeless_config()).unwrap();
        let candles = candles(&[10.0, 11.0, 9.0, 10.0, 12.0]);
        let mut advisor = ScriptedAdvisor::new(vec![
            (0, Recommendation::Long),
            (2, Recommendation::Soft),
            (4, Recommendation::Close),
        ]);
        let mut handler = RecordingHandler::default();

        let report = engine.run(&mut advisor, &candles, &mut handler).unwrap();

        // soft advice never reaches the handler
        assert_eq!(handler.trades.len(), 2);
        assert_eq!(handler.portfolio_updates.len(), 1);
        assert_eq!(handler.round_trips.len(), 1);

        let rt = handler.round_trips[0];
        assert_eq!(rt.entry_price, 10.0);
        assert_eq!(rt.exit_price, 12.0);
        // worst excursion was the candle at 9
        assert_eq!(rt.drawdown, -1.0);

        assert_eq!(report.trades, 1);
        assert_eq!(handler.finalized.unwrap(), report);
        // feeless long 10 -> 12 in spot accounting
        assert!((report.balance - (1.0 + 2.0 / 12.0)).abs() < 1e-7);
    }

    #[test]
    fn test_flip_emits_close_and_reentry() {
        let engine = BacktestEngine::new(feeless_config()).unwrap();
        let candles = candles(&[10.0, 12.0, 11.0]);
        let mut advisor = ScriptedAdvisor::new(vec![
            (0, Recommendation::Long),
            (1, Recommendation::Short),
            (2, Recommendation::Close),
        ]);
        let mut handler = RecordingHandler::default();

        engine.run(&mut advisor, &candles, &mut handler).unwrap();

        assert_eq!(handler.trades.len(), 3);
        assert_eq!(handler.round_trips.len(), 2);
        assert_eq!(handler.round_trips[0].exit_price, 12.0);
        assert_eq!(handler.round_trips[1].entry_price, 12.0);
        assert_eq!(
            handler.round_trips[1].side,
            papertrade_core::Side::Short
        );
    }

    #[test]
    fn test_out_of_order_candles_rejected() {
        let engine = BacktestEngine::new(feeless_config()).unwrap();
        let mut bad = candles(&[10.0, 11.0]);
        bad[1].start = -1;
        let mut advisor = ScriptedAdvisor::new(vec![]);
        let mut handler = RecordingHandler::default();

        assert!(engine.run(&mut advisor, &bad, &mut handler).is_err());
    }

    #[test]
    fn test_empty_stream_finalizes_cleanly() {
        let engine = BacktestEngine::new(feeless_config()).unwrap();
        let mut advisor = ScriptedAdvisor::new(vec![]);
        let mut handler = RecordingHandler::default();

        let report = engine.run(&mut advisor, &[], &mut handler).unwrap();
        assert_eq!(report.trades, 0);
        assert!(handler.finalized.is_some());
        assert!(!report.profit.is_nan());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = feeless_config();
        config.trader.slippage_pct = -0.5;
        assert!(BacktestEngine::new(config).is_err());
    }
}
