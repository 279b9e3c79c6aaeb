//! Portfolio simulation and performance statistics.
//!
//! The pipeline is synchronous and event-driven: candles and advice go in,
//! trades, round trips and reports come out through the `ReportHandler`
//! interface. See [`BacktestEngine`] for the driving loop.

mod fee;
mod trader;
mod tracker;
mod statistics;
mod engine;

pub use fee::{FeeModel, FeeSchedule, FeeTier};
pub use trader::{AccountingModel, PaperTrader, PaperTraderConfig, Position};
pub use tracker::PerformanceTracker;
pub use statistics::{calculate_report, sharpe, ReportInput};
pub use engine::{BacktestConfig, BacktestEngine};
